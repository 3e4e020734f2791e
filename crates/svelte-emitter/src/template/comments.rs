use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static EXPRESSION_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\s*/\*(.*?)\*/\s*\}").expect("valid expression comment regex")
});

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment regex"));

static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*//.*(?:\r?\n)?").expect("valid line comment regex"));

/// Converts `{/* x */}` into `<!-- x -->` and drops other JS comments.
///
/// Line comments are only recognized at the start of a line so that `//` in
/// URLs survives.
pub(super) fn rewrite_comments(text: &str) -> String {
    let text = EXPRESSION_COMMENT.replace_all(text, |caps: &Captures<'_>| {
        format!("<!-- {} -->", caps[1].trim())
    });
    let text = BLOCK_COMMENT.replace_all(&text, "");
    LINE_COMMENT.replace_all(&text, "").into_owned()
}
