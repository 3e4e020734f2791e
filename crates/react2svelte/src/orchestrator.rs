//! Main orchestration logic.

use crate::cli::Args;
use crate::config::{Config, ConfigError};
use crate::output::{FileReport, RunSummary, Status};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::Diagnostic;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::time::Instant;
use svelte_emitter::{transpile, TranspileError, TranspileOptions};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions picked up when walking a directory.
const COMPONENT_EXTENSIONS: [&str; 2] = ["jsx", "tsx"];

/// Orchestration errors.
#[derive(Debug, Error, Diagnostic)]
pub enum OrchestratorError {
    /// An input path does not exist.
    #[error("input not found: {0}")]
    MissingInput(Utf8PathBuf),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// `--stdout` was used with more than one file.
    #[error("--stdout needs exactly one input file, found {0}")]
    #[diagnostic(help("pass a single component file, or use --out-dir"))]
    StdoutNeedsOneFile(usize),

    /// Configuration could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// The output directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateOutDir {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

/// Converts every input and reports the outcome per file.
pub fn run(args: &Args) -> Result<RunSummary, OrchestratorError> {
    let config = load_config(args)?;
    let mut options = config.transpile_options();
    args.apply_overrides(&mut options);

    let ignore_set = build_ignore_set(args.ignore.iter().chain(&config.ignore))?;
    let files = collect_inputs(&args.inputs, &ignore_set)?;
    log::info!("converting {} file(s)", files.len());

    if args.stdout && files.len() != 1 {
        return Err(OrchestratorError::StdoutNeedsOneFile(files.len()));
    }
    if let Some(dir) = &args.out_dir {
        if !args.dry_run && !args.stdout {
            fs::create_dir_all(dir).map_err(|source| OrchestratorError::CreateOutDir {
                path: dir.clone(),
                source,
            })?;
        }
    }

    let jobs = plan_outputs(files, args.out_dir.as_deref());
    let reports: Vec<FileReport> = jobs
        .par_iter()
        .map(|job| convert_file(job, args, &options))
        .collect();

    Ok(RunSummary::from_reports(reports))
}

fn load_config(args: &Args) -> Result<Config, OrchestratorError> {
    if let Some(path) = &args.config {
        return Ok(Config::load(path)?);
    }

    let cwd = std::env::current_dir()
        .ok()
        .and_then(|p| Utf8PathBuf::try_from(p).ok())
        .unwrap_or_else(|| Utf8PathBuf::from("."));
    match Config::find(&cwd)? {
        Some((path, config)) => {
            log::info!("using configuration from {}", path);
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Builds the ignore set from user patterns plus the default ignores.
fn build_ignore_set<'a>(
    patterns: impl IntoIterator<Item = &'a String>,
) -> Result<GlobSet, OrchestratorError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }
    if let Ok(glob) = Glob::new("**/node_modules/**") {
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))
}

/// A component file found under one of the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: Utf8PathBuf,
    /// Path below the walked directory, or the file name for explicit files.
    pub relative: Utf8PathBuf,
}

impl SourceFile {
    fn explicit(path: &Utf8Path) -> Self {
        let relative = path.file_name().map_or_else(|| path.to_owned(), Utf8PathBuf::from);
        Self {
            path: path.to_owned(),
            relative,
        }
    }

    fn walked(root: &Utf8Path, path: Utf8PathBuf) -> Self {
        let relative = path.strip_prefix(root).map_or_else(|_| path.clone(), Utf8Path::to_owned);
        Self { path, relative }
    }
}

/// A file to convert, its target, and the earlier file already writing to
/// that target if any.
#[derive(Debug)]
struct Job {
    file: SourceFile,
    target: Utf8PathBuf,
    claimed_by: Option<Utf8PathBuf>,
}

/// Assigns output paths in input order. When two inputs map to the same
/// target, the first keeps it and the later ones are marked as conflicting.
fn plan_outputs(files: Vec<SourceFile>, out_dir: Option<&Utf8Path>) -> Vec<Job> {
    let mut owners: HashMap<Utf8PathBuf, Utf8PathBuf> = HashMap::new();

    files
        .into_iter()
        .map(|file| {
            let target = output_path(&file, out_dir);
            let claimed_by = match owners.get(&target) {
                Some(owner) => Some(owner.clone()),
                None => {
                    owners.insert(target.clone(), file.path.clone());
                    None
                }
            };
            Job {
                file,
                target,
                claimed_by,
            }
        })
        .collect()
}

/// Expands inputs into the list of component files to convert.
///
/// Explicit files are always kept. Directories are walked for `.jsx` and
/// `.tsx` files whose path relative to the directory is not ignored.
fn collect_inputs(
    inputs: &[Utf8PathBuf],
    ignore_set: &GlobSet,
) -> Result<Vec<SourceFile>, OrchestratorError> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(SourceFile::explicit(input));
            continue;
        }
        if !input.is_dir() {
            return Err(OrchestratorError::MissingInput(input.clone()));
        }

        let mut found: Vec<Utf8PathBuf> = WalkDir::new(input)
            .into_iter()
            .filter_entry(|e| e.file_name() != "node_modules")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| COMPONENT_EXTENSIONS.contains(&ext))
            })
            .filter(|p| {
                let relative = p.strip_prefix(input).unwrap_or(p);
                let ignored = ignore_set.is_match(relative.as_str());
                if ignored {
                    log::debug!("ignoring {}", p);
                }
                !ignored
            })
            .collect();
        found.sort();
        files.extend(found.into_iter().map(|path| SourceFile::walked(input, path)));
    }

    Ok(files)
}

/// Where the generated document for `file` goes: next to it, or under
/// `out_dir` at the same path relative to the walked input.
pub fn output_path(file: &SourceFile, out_dir: Option<&Utf8Path>) -> Utf8PathBuf {
    match out_dir {
        Some(dir) => dir.join(&file.relative).with_extension("svelte"),
        None => file.path.with_extension("svelte"),
    }
}

/// Converts one file. A failed file is never written.
fn convert_file(job: &Job, args: &Args, options: &TranspileOptions) -> FileReport {
    let start = Instant::now();
    let input = job.file.path.as_path();
    let target = &job.target;

    let source = match fs::read_to_string(input) {
        Ok(source) => source,
        Err(e) => {
            log::warn!("failed to read {}: {}", input, e);
            return FileReport::io_failure(
                input,
                format!("failed to read file: {}", e),
                start.elapsed(),
            );
        }
    };

    let result = match transpile(&source, options) {
        Ok(result) => result,
        Err(TranspileError::Parse(error)) => {
            return FileReport::parse_failure(input, &source, &error, start.elapsed());
        }
    };
    log::debug!(
        "{}: component `{}` with {} input(s), {} state slot(s)",
        input,
        result.component.name,
        result.component.inputs.len(),
        result.component.state_slots.len()
    );

    let status = if args.stdout {
        Status::Printed
    } else if args.dry_run {
        Status::DryRun
    } else {
        if let Some(owner) = &job.claimed_by {
            log::warn!("{} would overwrite the output of {}", input, owner);
            return FileReport::io_failure(
                input,
                format!("{} is already the output of {}", target, owner),
                start.elapsed(),
            );
        }
        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return FileReport::io_failure(
                    input,
                    format!("failed to create {}: {}", parent, e),
                    start.elapsed(),
                );
            }
        }
        if let Err(e) = fs::write(target, &result.svelte_code) {
            return FileReport::io_failure(
                input,
                format!("failed to write {}: {}", target, e),
                start.elapsed(),
            );
        }
        Status::Written
    };

    FileReport {
        input: input.to_string(),
        output: (status == Status::Written).then(|| target.to_string()),
        status,
        error: None,
        document: Some(result.svelte_code),
        rendered: None,
        elapsed: start.elapsed(),
    }
}
