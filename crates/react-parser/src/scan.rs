//! Delimiter-aware text scanning shared by the extractor and the markup passes.
//!
//! Two flavours exist. The `code` helpers skip string literals, template
//! literals and comments, which is right for declaration code. The `raw`
//! helpers count delimiters only, which is right for markup where an
//! apostrophe in text content must not start a string.

/// Returns true for characters that may appear in a JS identifier.
#[inline]
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Returns true when `name` is a plain JS identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(is_ident_char)
        }
        _ => false,
    }
}

fn closing_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'{' => Some(b'}'),
        b'[' => Some(b']'),
        b'<' => Some(b'>'),
        _ => None,
    }
}

/// Finds the index of the delimiter closing the one at `open_idx`, skipping
/// strings and comments.
///
/// Only the delimiter kind found at `open_idx` is counted.
pub fn find_matching(s: &str, open_idx: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let open = *bytes.get(open_idx)?;
    let close = closing_for(open)?;
    let mut depth = 0usize;
    let mut i = open_idx;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
                continue;
            }
            _ if b == open => depth += 1,
            _ if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Returns the index just past the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            // Unterminated single-line strings end at the newline.
            b'\n' if quote != b'`' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Finds the index of the delimiter closing the one at `open_idx`, counting
/// delimiters only.
pub fn find_matching_raw(s: &str, open_idx: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let open = *bytes.get(open_idx)?;
    let close = closing_for(open)?;
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate().skip(open_idx) {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }

    None
}

/// Splits `s` at every separator found outside `()`, `[]`, `{}` and strings.
///
/// When `angle` is set, `<...>` also nests (for type text), ignoring the `>`
/// of `=>`. Pieces are trimmed; empty pieces are dropped.
pub fn split_top_level(s: &str, is_separator: impl Fn(char) -> bool, angle: bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth: i32 = 0;
    let mut in_string: Option<char> = None;
    let mut prev = '\0';
    let mut start = 0;

    for (i, ch) in s.char_indices() {
        if let Some(quote) = in_string {
            if ch == quote && prev != '\\' {
                in_string = None;
            }
            prev = ch;
            continue;
        }

        match ch {
            '"' | '\'' | '`' => in_string = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '<' if angle => depth += 1,
            '>' if angle && prev != '=' => depth -= 1,
            _ if depth <= 0 && is_separator(ch) => {
                push_piece(&mut pieces, &s[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
        prev = ch;
    }
    push_piece(&mut pieces, &s[start..]);

    pieces
}

fn push_piece<'a>(pieces: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        pieces.push(piece);
    }
}

/// Finds the first top-level `=` that is an assignment (not `==`, `=>`, `<=`...).
pub fn find_assignment(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth: i32 = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' | b'{' | b'[' => depth += 1,
            b')' | b'}' | b']' => depth -= 1,
            b'=' if depth == 0 => {
                let next = bytes.get(i + 1).copied();
                let prev = if i > 0 { bytes[i - 1] } else { b' ' };
                if next != Some(b'=')
                    && next != Some(b'>')
                    && !matches!(prev, b'=' | b'!' | b'<' | b'>')
                {
                    return Some(i);
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Strips one layer of parentheses when they wrap the whole (trimmed) text.
pub fn strip_wrapping_parens(s: &str) -> &str {
    let trimmed = s.trim();
    if trimmed.starts_with('(') && find_matching(trimmed, 0) == Some(trimmed.len() - 1) {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Finds `word` in `s` at identifier boundaries, starting at `from`.
///
/// A match preceded by `.` is a member access and is skipped.
pub fn find_identifier(s: &str, word: &str, from: usize) -> Option<usize> {
    let mut search = from;
    while let Some(rel) = s.get(search..)?.find(word) {
        let idx = search + rel;
        let before = s[..idx].chars().next_back();
        let after = s[idx + word.len()..].chars().next();
        let boundary_before = before.map_or(true, |c| !is_ident_char(c) && c != '.');
        let boundary_after = after.map_or(true, |c| !is_ident_char(c));
        if boundary_before && boundary_after {
            return Some(idx);
        }
        search = idx + word.len();
    }
    None
}

/// Replaces every identifier-boundary occurrence of `from` with `to`.
pub fn replace_identifier(s: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut cursor = 0;
    let mut search = 0;

    while let Some(rel) = s[search..].find(from) {
        let idx = search + rel;
        let before = s[..idx].chars().next_back();
        let after = s[idx + from.len()..].chars().next();
        if before.map_or(true, |c| !is_ident_char(c)) && after.map_or(true, |c| !is_ident_char(c))
        {
            out.push_str(&s[cursor..idx]);
            out.push_str(to);
            cursor = idx + from.len();
        }
        search = idx + from.len();
    }
    out.push_str(&s[cursor..]);
    out
}

/// Removes blank lines, keeping the remaining lines as they are.
pub fn drop_blank_lines(s: &str) -> String {
    s.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_matching_nested() {
        let s = "(a(b)c)";
        assert_eq!(find_matching(s, 0), Some(6));
        assert_eq!(find_matching(s, 2), Some(4));
    }

    #[test]
    fn test_find_matching_skips_strings_and_comments() {
        let s = "(\")\" + ')' // )\n + `)` /* ) */)";
        assert_eq!(find_matching(s, 0), Some(s.len() - 1));
    }

    #[test]
    fn test_find_matching_unbalanced() {
        assert_eq!(find_matching("(a(b)", 0), None);
        assert_eq!(find_matching("abc", 0), None);
    }

    #[test]
    fn test_find_matching_raw_ignores_quotes() {
        let s = "{cond && (<p>Don't</p>)}";
        assert_eq!(find_matching_raw(s, 0), Some(s.len() - 1));
    }

    #[test]
    fn test_split_top_level_commas() {
        let parts = split_top_level("a, b = { x: 1, y: 2 }, c = f(1, 2)", |c| c == ',', false);
        assert_eq!(parts, vec!["a", "b = { x: 1, y: 2 }", "c = f(1, 2)"]);
    }

    #[test]
    fn test_split_top_level_with_generics() {
        let parts = split_top_level(
            "a: Record<string, number>; onChange: (v: string) => void; b: string",
            |c| c == ';' || c == ',',
            true,
        );
        assert_eq!(
            parts,
            vec![
                "a: Record<string, number>",
                "onChange: (v: string) => void",
                "b: string"
            ]
        );
    }

    #[test]
    fn test_find_assignment() {
        assert_eq!(find_assignment("size = 10"), Some(5));
        assert_eq!(find_assignment("onClick = () => {}"), Some(8));
        assert_eq!(find_assignment("a == b"), None);
        assert_eq!(find_assignment("{ x = 1 }"), None);
    }

    #[test]
    fn test_strip_wrapping_parens() {
        assert_eq!(strip_wrapping_parens(" ({...prev}) "), "{...prev}");
        assert_eq!(strip_wrapping_parens("(a) + (b)"), "(a) + (b)");
        assert_eq!(strip_wrapping_parens("a"), "a");
    }

    #[test]
    fn test_find_identifier_boundaries() {
        let s = "resetCount(); obj.setCount(1); setCount(2)";
        assert_eq!(find_identifier(s, "setCount", 0), Some(31));
    }

    #[test]
    fn test_replace_identifier() {
        assert_eq!(
            replace_identifier("prev + prevTotal + a.prev", "prev", "count"),
            "count + prevTotal + a.count"
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("count"));
        assert!(is_identifier("$store"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a.b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_drop_blank_lines() {
        assert_eq!(drop_blank_lines("a\n\n  \nb"), "a\nb");
    }
}
