//! Conditional rendering to `{#if}` blocks.
//!
//! Recognized forms:
//! - `{cond ? (<A/>) : (<B/>)}`, with nested ternaries in the alternate
//!   becoming `{:else if}` branches
//! - `{cond ? (<A/>) : null}` and `{cond ? null : (<B/>)}`
//! - `{cond && (<A/>)}` and `{cond && <A/>}`
//!
//! A branch may also be a markup-producing `.map` call, which renders as an
//! `{#each}` block inside the `{#if}`.

use super::{as_markup, each_block, render_block, rewrite_braced};
use react_parser::scan::find_matching_raw;

/// A ternary branch that may render.
enum Branch {
    Markup(String),
    Nothing,
}

/// A parsed conditional: ordered `(condition, body)` arms plus an optional
/// else body.
#[derive(Debug, PartialEq, Eq)]
struct Conditional {
    arms: Vec<(String, String)>,
    otherwise: Option<String>,
}

/// Rewrites every conditional expression that renders markup.
pub(super) fn rewrite_conditionals(text: &str, key_attribute: &str) -> String {
    rewrite_braced(text, |expr, indent| {
        if expr.starts_with(['#', '/', ':', '@']) {
            return None;
        }
        let conditional = parse_ternary(expr, key_attribute)
            .or_else(|| parse_guard(expr, key_attribute))?;
        log::trace!("if block on `{}`", conditional.arms[0].0);
        Some(render_if(&conditional, key_attribute, indent))
    })
}

fn render_if(conditional: &Conditional, key_attribute: &str, indent: &str) -> String {
    let mut sections = Vec::with_capacity(conditional.arms.len() + 1);
    for (i, (condition, body)) in conditional.arms.iter().enumerate() {
        let header = if i == 0 {
            format!("{{#if {}}}", condition)
        } else {
            format!("{{:else if {}}}", condition)
        };
        sections.push((header, rewrite_conditionals(body, key_attribute)));
    }
    if let Some(body) = &conditional.otherwise {
        sections.push((
            "{:else}".to_string(),
            rewrite_conditionals(body, key_attribute),
        ));
    }
    render_block(&sections, "{/if}", indent)
}

/// The body a branch renders: markup as written, or a `.map` call as an
/// `{#each}` block.
fn rendered_body(expr: &str, key_attribute: &str) -> Option<String> {
    if let Some(markup) = as_markup(expr) {
        return Some(markup.to_string());
    }
    each_block::render_map(unwrap_parens(expr), key_attribute, "")
}

fn branch(expr: &str, key_attribute: &str) -> Option<Branch> {
    if let Some(body) = rendered_body(expr, key_attribute) {
        return Some(Branch::Markup(body));
    }
    let bare = expr.trim().trim_start_matches('(').trim_end_matches(')').trim();
    matches!(bare, "null" | "undefined" | "false").then_some(Branch::Nothing)
}

fn parse_ternary(expr: &str, key_attribute: &str) -> Option<Conditional> {
    let question = ternary_question(expr)?;
    let condition = expr[..question].trim();
    if condition.is_empty() {
        return None;
    }
    let rest = &expr[question + 1..];
    let colon = ternary_colon(rest)?;
    let consequent = branch(&rest[..colon], key_attribute)?;
    let alternate = &rest[colon + 1..];

    let condition = condition.to_string();
    match (consequent, branch(alternate, key_attribute)) {
        (Branch::Markup(then), Some(Branch::Markup(otherwise))) => Some(Conditional {
            arms: vec![(condition, then)],
            otherwise: Some(otherwise),
        }),
        (Branch::Markup(then), Some(Branch::Nothing)) => Some(Conditional {
            arms: vec![(condition, then)],
            otherwise: None,
        }),
        (Branch::Markup(then), None) => {
            let nested = parse_ternary(unwrap_parens(alternate), key_attribute)?;
            let mut arms = vec![(condition, then)];
            arms.extend(nested.arms);
            Some(Conditional {
                arms,
                otherwise: nested.otherwise,
            })
        }
        (Branch::Nothing, Some(Branch::Markup(otherwise))) => Some(Conditional {
            arms: vec![(negate(&condition), otherwise)],
            otherwise: None,
        }),
        _ => None,
    }
}

/// Parses `cond && markup`, splitting at the first top-level `&&` whose right
/// side renders.
fn parse_guard(expr: &str, key_attribute: &str) -> Option<Conditional> {
    let bytes = expr.as_bytes();
    let mut depth = 0i32;
    let mut quote = None;
    let mut i = 0;

    while i + 1 < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b'&' if depth == 0 && bytes[i + 1] == b'&' => {
                let condition = expr[..i].trim();
                if !condition.is_empty() {
                    if let Some(body) = rendered_body(&expr[i + 2..], key_attribute) {
                        return Some(Conditional {
                            arms: vec![(condition.to_string(), body)],
                            otherwise: None,
                        });
                    }
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Finds the top-level `?` of a ternary, skipping `?.` and `??`.
fn ternary_question(expr: &str) -> Option<usize> {
    let bytes = expr.as_bytes();
    let mut depth = 0i32;
    let mut quote = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b'?' => match bytes.get(i + 1) {
                Some(b'?') => i += 1,
                Some(b'.') => {}
                _ if depth == 0 => return Some(i),
                _ => {}
            },
            _ => {}
        }
        i += 1;
    }

    None
}

/// Finds the `:` pairing with an already consumed `?`, skipping the colons of
/// nested ternaries. Quotes are not tracked since branches may hold markup;
/// elements are skipped whole so their text cannot end a branch.
fn ternary_colon(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut depth = 0i32;
    let mut pending = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' if depth == 0 => {
                if let Some(end) = element_end(rest, i) {
                    i = end;
                    continue;
                }
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b'?' if depth == 0 => match bytes.get(i + 1) {
                Some(b'?') => i += 1,
                Some(b'.') => {}
                _ => pending += 1,
            },
            b':' if depth == 0 => {
                if pending == 0 {
                    return Some(i);
                }
                pending -= 1;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Returns the index just past the element opened at `start`, or `None` when
/// the `<` there is not an element that closes.
fn element_end(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let first = *bytes.get(start + 1)?;
    if !first.is_ascii_alphabetic() && first != b'>' {
        return None;
    }
    let name_len = bytes[start + 1..]
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_' | b':'))
        .count();
    let name = &text[start + 1..start + 1 + name_len];

    let (open_end, self_closing) = tag_end(text, start)?;
    if self_closing {
        return Some(open_end + 1);
    }

    let mut depth = 1;
    let mut i = open_end + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                i = find_matching_raw(text, i)? + 1;
                continue;
            }
            b'<' if bytes.get(i + 1) == Some(&b'/') => {
                let (end, _) = tag_end(text, i)?;
                if text[i + 2..end].trim() == name {
                    depth -= 1;
                    if depth == 0 {
                        return Some(end + 1);
                    }
                }
                i = end + 1;
                continue;
            }
            b'<' if text[i + 1..].starts_with(name)
                && ends_tag_name(name, bytes.get(i + 1 + name.len())) =>
            {
                let (end, self_closing) = tag_end(text, i)?;
                if !self_closing {
                    depth += 1;
                }
                i = end + 1;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Finds the `>` closing the tag opened at `start` and whether the tag is
/// self-closing.
fn tag_end(text: &str, start: usize) -> Option<(usize, bool)> {
    let bytes = text.as_bytes();
    let mut quote = None;
    let mut i = start + 1;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some(b),
            b'{' => i = find_matching_raw(text, i)?,
            b'>' => return Some((i, text[start + 1..i].trim_end().ends_with('/'))),
            _ => {}
        }
        i += 1;
    }

    None
}

/// Whether `next` ends an opening tag name equal to `name`. A fragment opener
/// is only `<>`.
fn ends_tag_name(name: &str, next: Option<&u8>) -> bool {
    match next {
        Some(b'>') => true,
        Some(&b) if !name.is_empty() => b == b'/' || b.is_ascii_whitespace(),
        _ => false,
    }
}

fn unwrap_parens(expr: &str) -> &str {
    let expr = expr.trim();
    if expr.starts_with('(') && find_matching_raw(expr, 0) == Some(expr.len() - 1) {
        expr[1..expr.len() - 1].trim()
    } else {
        expr
    }
}

fn negate(condition: &str) -> String {
    let simple = condition
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'));
    if simple {
        format!("!{}", condition)
    } else {
        format!("!({})", condition)
    }
}
