//! Output formatting.

use crate::cli::OutputFormat;
use camino::Utf8Path;
use miette::{LabeledSpan, NamedSource};
use react_parser::ParseError;
use serde::Serialize;
use std::time::Duration;

/// What happened to one input file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// The generated document was written to disk.
    Written,
    /// The generated document was printed to stdout.
    Printed,
    /// Converted but not written.
    DryRun,
    /// Nothing was generated.
    Failed,
}

/// Location and message of a failed conversion.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub message: String,
    /// 1-indexed, absent for I/O failures.
    pub line: Option<usize>,
    pub column: Option<usize>,
}

/// The outcome for one input file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub input: String,
    pub output: Option<String>,
    pub status: Status,
    pub error: Option<FailureReport>,
    /// The generated document, kept for `--stdout`.
    #[serde(skip)]
    pub document: Option<String>,
    /// A pre-rendered diagnostic for human output.
    #[serde(skip)]
    pub rendered: Option<String>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl FileReport {
    /// A file that failed for a reason other than its content.
    pub fn io_failure(input: &Utf8Path, message: String, elapsed: Duration) -> Self {
        Self {
            input: input.to_string(),
            output: None,
            status: Status::Failed,
            error: Some(FailureReport {
                message,
                line: None,
                column: None,
            }),
            document: None,
            rendered: None,
            elapsed,
        }
    }

    /// A file whose markup could not be isolated.
    pub fn parse_failure(
        input: &Utf8Path,
        source: &str,
        error: &ParseError,
        elapsed: Duration,
    ) -> Self {
        let (line, column) = error.line_col(source);
        Self {
            input: input.to_string(),
            output: None,
            status: Status::Failed,
            error: Some(FailureReport {
                message: error.to_string(),
                line: Some(line),
                column: Some(column),
            }),
            document: None,
            rendered: Some(render_parse_error(input, source, error)),
            elapsed,
        }
    }
}

/// Summary of a whole run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub converted: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    /// Builds a summary from per-file reports.
    pub fn from_reports(files: Vec<FileReport>) -> Self {
        let failed = files
            .iter()
            .filter(|report| report.status == Status::Failed)
            .count();
        Self {
            converted: files.len() - failed,
            failed,
            files,
        }
    }
}

/// Renders a parse error as a labelled source snippet.
pub fn render_parse_error(path: &Utf8Path, source: &str, error: &ParseError) -> String {
    let start = usize::from(error.span.start());
    let len = usize::from(error.span.len());
    let report = miette::miette!(
        labels = vec![LabeledSpan::at(start..start + len, "markup opened here")],
        help = "every `(` inside the returned markup needs a matching `)`",
        "{}",
        error
    )
    .with_source_code(NamedSource::new(path.as_str(), source.to_string()));
    format!("{:?}", report)
}

/// Formats run summaries.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a run summary.
    pub fn format(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Human => Self::format_human(summary),
            OutputFormat::Json => Self::format_json(summary),
        }
    }

    fn format_human(summary: &RunSummary) -> String {
        let mut output = String::new();

        for file in &summary.files {
            match file.status {
                Status::Written => output.push_str(&format!(
                    "{} -> {}\n",
                    file.input,
                    file.output.as_deref().unwrap_or_default()
                )),
                Status::DryRun => output.push_str(&format!("{} (dry run)\n", file.input)),
                Status::Printed => {}
                Status::Failed => match (&file.rendered, &file.error) {
                    (Some(rendered), _) => {
                        output.push_str(rendered);
                        output.push('\n');
                    }
                    (None, Some(error)) => {
                        output.push_str(&format!("{}: {}\n", file.input, error.message))
                    }
                    (None, None) => output.push_str(&format!("{}: failed\n", file.input)),
                },
            }
        }

        output.push_str(&format!(
            "{} converted, {} failed\n",
            summary.converted, summary.failed
        ));
        output
    }

    fn format_json(summary: &RunSummary) -> String {
        let mut json = serde_json::to_string_pretty(summary).unwrap_or_default();
        json.push('\n');
        json
    }
}

/// Formats per-file timings for stderr.
pub fn format_timings(summary: &RunSummary, total: Duration) -> String {
    let mut output = String::from("Timings\n");
    for file in &summary.files {
        output.push_str(&format!(
            "  {}: {:.2}ms\n",
            file.input,
            file.elapsed.as_secs_f64() * 1000.0
        ));
    }
    output.push_str(&format!("  total: {:.2}ms\n", total.as_secs_f64() * 1000.0));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use react_parser::{ParseErrorKind, TextRange, TextSize};

    fn written(input: &str, output: &str) -> FileReport {
        FileReport {
            input: input.to_string(),
            output: Some(output.to_string()),
            status: Status::Written,
            error: None,
            document: Some("<script lang=\"ts\">\n</script>\n".to_string()),
            rendered: None,
            elapsed: Duration::from_millis(1),
        }
    }

    fn broken() -> FileReport {
        let source = "function A() {\n  return (\n    <p>(</p>\n";
        let error = ParseError::new(
            ParseErrorKind::UnbalancedDelimiter { depth: 2 },
            TextRange::new(TextSize::from(17), TextSize::from(25)),
        );
        FileReport::parse_failure(Utf8Path::new("A.tsx"), source, &error, Duration::ZERO)
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary::from_reports(vec![written("A.tsx", "A.svelte"), broken()]);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_parse_failure_location() {
        let report = broken();
        let error = report.error.unwrap();
        assert_eq!(error.line, Some(2));
        assert_eq!(error.column, Some(3));
        assert!(report
            .rendered
            .unwrap()
            .contains("could not match markup parentheses"));
    }

    #[test]
    fn test_human_output() {
        let summary = RunSummary::from_reports(vec![written("src/A.tsx", "src/A.svelte")]);
        let output = Formatter::new(OutputFormat::Human).format(&summary);
        assert_eq!(output, "src/A.tsx -> src/A.svelte\n1 converted, 0 failed\n");
    }

    #[test]
    fn test_json_output_skips_documents() {
        let summary = RunSummary::from_reports(vec![written("A.tsx", "A.svelte"), broken()]);
        let output = Formatter::new(OutputFormat::Json).format(&summary);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["converted"], 1);
        assert_eq!(value["files"][0]["status"], "written");
        assert_eq!(value["files"][1]["status"], "failed");
        assert_eq!(value["files"][1]["error"]["line"], 2);
        assert!(value["files"][0].get("document").is_none());
    }
}
