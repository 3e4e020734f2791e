//! Indentation helpers shared by the markup passes and the generator.

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Returns the leading whitespace of the line containing byte `idx`.
pub(crate) fn line_indent(text: &str, idx: usize) -> &str {
    let start = text[..idx].rfind('\n').map_or(0, |nl| nl + 1);
    let line = &text[start..];
    &line[..indent_width(line)]
}

/// Splits `text` into lines with their common indentation removed.
///
/// The text is trimmed first, so the first line never carries indentation and
/// the common width is taken over the remaining non-blank lines. Blank lines
/// come back as empty strings.
pub(crate) fn dedent(text: &str) -> Vec<&str> {
    let mut lines = text.trim().lines().map(str::trim_end);
    let Some(first) = lines.next() else {
        return Vec::new();
    };
    let rest: Vec<&str> = lines.collect();
    let common = rest
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    std::iter::once(first)
        .chain(rest.into_iter().map(|line| line.get(common..).unwrap_or("")))
        .collect()
}

/// Re-indents `text` under `prefix`, one output line per input line.
pub(crate) fn indent_lines(text: &str, prefix: &str, keep_blank: bool) -> String {
    let mut out = String::new();
    for line in dedent(text) {
        if line.is_empty() {
            if keep_blank {
                out.push('\n');
            }
            continue;
        }
        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_indent() {
        let text = "<ul>\n    {items}\n</ul>";
        assert_eq!(line_indent(text, text.find('{').unwrap()), "    ");
        assert_eq!(line_indent(text, 0), "");
    }

    #[test]
    fn test_dedent_trimmed_first_line() {
        let text = "<li>\n            {item}\n          </li>";
        assert_eq!(dedent(text), vec!["<li>", "  {item}", "</li>"]);
    }

    #[test]
    fn test_dedent_keeps_blank_lines() {
        assert_eq!(dedent("a();\n\n    b();"), vec!["a();", "", "b();"]);
        assert!(dedent("   ").is_empty());
    }

    #[test]
    fn test_indent_lines() {
        assert_eq!(
            indent_lines("if (x) {\n      y();\n\n    }", "    ", false),
            "    if (x) {\n      y();\n    }\n"
        );
    }
}
