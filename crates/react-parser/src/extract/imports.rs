//! Import statement recognition.

use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(?:type\s+)?(?:[^'";]*?\s*from\s*)?['"]([^'"]+)['"]"#)
        .expect("valid import regex")
});

/// Captures import statements whose specifier does not contain any of the
/// `excluded` sources.
pub(crate) fn extract_imports(code: &str, excluded: &[String]) -> Vec<String> {
    IMPORT
        .captures_iter(code)
        .filter_map(|caps| {
            let statement = caps.get(0)?.as_str().trim();
            let source = caps.get(1)?.as_str();
            if excluded.iter().any(|ex| source.contains(ex.as_str())) {
                log::trace!("dropping framework import from `{}`", source);
                return None;
            }
            Some(statement.to_string())
        })
        .collect()
}
