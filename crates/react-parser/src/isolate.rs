//! Separates the returned markup from the surrounding declaration code.
//!
//! The first `return (` opens the markup span; the span ends at the paren that
//! brings the depth back to zero. Parens inside strings or comments are counted
//! like any other, so markup containing unbalanced literal parens is not
//! supported.

use crate::error::{ParseError, ParseErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;
use text_size::{TextRange, TextSize};

static MARKUP_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breturn\s*\(").expect("valid opener regex"));

/// Declaration code and markup split out of one component source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isolated<'a> {
    /// The source with the `return ( ... )` region removed.
    pub declarations: String,
    /// The markup between the parens, trimmed. Empty when there was no opener.
    pub markup: &'a str,
    /// The excised region, from the start of `return` through the closing paren.
    pub region: Option<TextRange>,
}

impl Isolated<'_> {
    /// Re-inserts the excised region into the declaration code.
    pub fn reconstruct(&self, source: &str) -> String {
        match self.region {
            Some(region) => {
                let split = usize::from(region.start());
                let mut out = String::with_capacity(source.len());
                out.push_str(&self.declarations[..split]);
                out.push_str(&source[region]);
                out.push_str(&self.declarations[split..]);
                out
            }
            None => self.declarations.clone(),
        }
    }
}

/// Splits `source` into declaration code and the returned markup span.
pub fn isolate_markup(source: &str) -> Result<Isolated<'_>, ParseError> {
    let Some(opener) = MARKUP_OPENER.find(source) else {
        log::debug!("no `return (` found; treating the whole source as declarations");
        return Ok(Isolated {
            declarations: source.to_string(),
            markup: "",
            region: None,
        });
    };

    let content_start = opener.end();
    let mut depth = 1usize;
    let mut close = None;

    for (i, b) in source.bytes().enumerate().skip(content_start) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    let Some(close) = close else {
        return Err(ParseError::new(
            ParseErrorKind::UnbalancedDelimiter { depth },
            range(opener.start(), opener.end()),
        ));
    };

    let mut declarations = String::with_capacity(source.len());
    declarations.push_str(&source[..opener.start()]);
    declarations.push_str(&source[close + 1..]);

    let markup = source[content_start..close].trim();
    log::trace!(
        "isolated {} bytes of markup at {}..{}",
        markup.len(),
        opener.start(),
        close + 1
    );

    Ok(Isolated {
        declarations,
        markup,
        region: Some(range(opener.start(), close + 1)),
    })
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COUNTER: &str = r#"export default function Counter() {
  const [count, setCount] = useState(0);
  return (
    <button onClick={() => setCount(count + 1)}>
      {count}
    </button>
  );
}"#;

    #[test]
    fn test_isolates_markup_span() {
        let isolated = isolate_markup(COUNTER).unwrap();
        assert_eq!(
            isolated.markup,
            "<button onClick={() => setCount(count + 1)}>\n      {count}\n    </button>"
        );
        assert!(!isolated.declarations.contains("<button"));
        assert!(isolated.declarations.contains("useState(0)"));
        assert!(isolated.declarations.trim_end().ends_with(";\n}"));
    }

    #[test]
    fn test_round_trip() {
        let isolated = isolate_markup(COUNTER).unwrap();
        assert_eq!(isolated.reconstruct(COUNTER), COUNTER);
    }

    #[test]
    fn test_no_opener_is_not_an_error() {
        let source = "export const answer = 42;";
        let isolated = isolate_markup(source).unwrap();
        assert_eq!(isolated.declarations, source);
        assert_eq!(isolated.markup, "");
        assert_eq!(isolated.region, None);
    }

    #[test]
    fn test_unbalanced_fails() {
        let source = "function A() {\n  return (\n    <div>{f(1}</div>\n";
        let err = isolate_markup(source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedDelimiter { depth: 2 });
        assert_eq!(usize::from(err.span.start()), 17);
        assert_eq!(err.line_col(source), (2, 3));
    }

    #[test]
    fn test_first_opener_wins() {
        let source = "function A() { return (<a/>); }\nfunction B() { return (<b/>); }";
        let isolated = isolate_markup(source).unwrap();
        assert_eq!(isolated.markup, "<a/>");
        assert!(isolated.declarations.contains("return (<b/>)"));
    }

    #[test]
    fn test_opener_without_space() {
        let isolated = isolate_markup("function A() { return(<p>hi</p>) }").unwrap();
        assert_eq!(isolated.markup, "<p>hi</p>");
        assert_eq!(isolated.declarations, "function A() {  }");
    }
}
