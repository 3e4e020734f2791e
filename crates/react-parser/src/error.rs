//! Parse error types.

use text_size::TextRange;
use thiserror::Error;

/// An error that aborted parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The location in the source the error points at.
    pub span: TextRange,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    /// Computes the 1-indexed line and column of the span start in `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = usize::from(self.span.start()).min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let col = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, col)
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The returned markup opened with `return (` never rebalanced.
    #[error("could not match markup parentheses ({depth} left open at end of input)")]
    UnbalancedDelimiter {
        /// Paren depth remaining when the input ran out.
        depth: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    #[test]
    fn test_error_display() {
        let error = ParseError::new(
            ParseErrorKind::UnbalancedDelimiter { depth: 2 },
            TextRange::new(TextSize::from(0), TextSize::from(8)),
        );
        assert_eq!(
            error.to_string(),
            "could not match markup parentheses (2 left open at end of input)"
        );
    }

    #[test]
    fn test_line_col() {
        let source = "const a = 1;\n  return (\n<div>";
        let error = ParseError::new(
            ParseErrorKind::UnbalancedDelimiter { depth: 1 },
            TextRange::new(TextSize::from(15), TextSize::from(23)),
        );
        assert_eq!(error.line_col(source), (2, 3));
    }
}
