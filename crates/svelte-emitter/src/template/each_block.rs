//! `{items.map((item, i) => (...))}` to `{#each items as item, i (key)}`.

use super::{as_markup, render_block, rewrite_braced};
use react_parser::scan::{find_identifier, find_matching_raw, is_identifier, split_top_level};

/// A recognized `.map` call.
#[derive(Debug, PartialEq, Eq)]
struct MapCall<'a> {
    collection: &'a str,
    item: &'a str,
    index: Option<&'a str>,
    markup: &'a str,
}

/// Rewrites every `.map` expression that renders markup.
pub(super) fn rewrite_iterations(text: &str, key_attribute: &str) -> String {
    rewrite_braced(text, |expr, indent| render_map(expr, key_attribute, indent))
}

/// Renders `expr` as an `{#each}` block when it is a markup-producing `.map`
/// call, with continuation lines indented under `indent`.
pub(super) fn render_map(expr: &str, key_attribute: &str, indent: &str) -> Option<String> {
    let call = parse_map_call(expr)?;
    log::trace!("each block over `{}`", call.collection);
    Some(render_each(&call, key_attribute, indent))
}

fn render_each(call: &MapCall<'_>, key_attribute: &str, indent: &str) -> String {
    let (markup, key) = take_key(call.markup, key_attribute);
    let body = rewrite_iterations(&markup, key_attribute);

    // `items?.map` iterates nothing when `items` is absent.
    let collection = match call.collection.strip_suffix('?') {
        Some(base) => format!("{} ?? []", base.trim_end()),
        None => call.collection.to_string(),
    };

    let mut header = format!("{{#each {} as {}", collection, call.item);
    if let Some(index) = call.index {
        header.push_str(", ");
        header.push_str(index);
    }
    if let Some(key) = key {
        header.push_str(" (");
        header.push_str(&key);
        header.push(')');
    }
    header.push('}');

    render_block(&[(header, body)], "{/each}", indent)
}

/// Parses `collection.map(callback)` where the callback returns markup.
fn parse_map_call(expr: &str) -> Option<MapCall<'_>> {
    let mut search = 0;

    while let Some(rel) = expr[search..].find(".map(") {
        let dot = search + rel;
        search = dot + 1;
        let open = dot + ".map".len();
        if find_matching_raw(expr, open) != Some(expr.len() - 1) {
            continue;
        }

        let collection = expr[..dot].trim();
        if collection.is_empty() || !is_single_operand(collection) {
            return None;
        }
        let (params, body) = split_callback(expr[open + 1..expr.len() - 1].trim())?;
        let markup = callback_markup(body)?;

        let mut params = params.into_iter();
        let item = params.next()?;
        return Some(MapCall {
            collection,
            item,
            index: params.next(),
            markup,
        });
    }

    None
}

/// Returns true when `.map` applies to the whole of `collection`.
///
/// A top-level operator (`cond ? a : b`, `ok && items`, `a || b`, `n > 0`)
/// binds looser than member access, so `.map` would only apply to its last
/// operand. A trailing `?` from `items?.map` is allowed.
fn is_single_operand(collection: &str) -> bool {
    let operand = collection.strip_suffix('?').unwrap_or(collection);
    let bytes = operand.as_bytes();
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
            _ if depth > 0 => {}
            b'?' if bytes.get(i + 1) == Some(&b'.') => {}
            b'?' | b':' | b'&' | b'|' | b'<' | b'>' | b'=' | b'!' | b'+' | b'-' | b'*'
            | b'/' | b'%' | b',' => return false,
            _ => {}
        }
        i += 1;
    }

    true
}

/// Splits `(a, b) => body` or `a => body` into binding names and body.
fn split_callback(callback: &str) -> Option<(Vec<&str>, &str)> {
    let (params, rest) = if callback.starts_with('(') {
        let close = find_matching_raw(callback, 0)?;
        (&callback[1..close], &callback[close + 1..])
    } else {
        let arrow = callback.find("=>")?;
        let param = callback[..arrow].trim();
        if !is_identifier(param) {
            return None;
        }
        (param, &callback[arrow..])
    };
    let body = rest.trim_start().strip_prefix("=>")?.trim();

    let names = split_top_level(params, |c| c == ',', false)
        .into_iter()
        .map(binding_name)
        .collect();
    Some((names, body))
}

/// Drops a type annotation: `item: Item` is bound as `item`.
fn binding_name(param: &str) -> &str {
    split_top_level(param, |c| c == ':', true)
        .into_iter()
        .next()
        .unwrap_or(param)
}

/// Returns the rendered markup of an expression or `{ return (...); }` body.
fn callback_markup(body: &str) -> Option<&str> {
    if !body.starts_with('{') {
        return as_markup(body);
    }
    if find_matching_raw(body, 0) != Some(body.len() - 1) {
        return None;
    }
    let returned = body[1..body.len() - 1].trim().strip_prefix("return")?;
    if !returned.starts_with(|c: char| c.is_whitespace() || c == '(') {
        return None;
    }
    as_markup(returned.trim().trim_end_matches(';'))
}

/// Removes the key attribute from the root element's opening tag, returning
/// the remaining markup and the key expression.
fn take_key(markup: &str, key_attribute: &str) -> (String, Option<String>) {
    let Some(tag_end) = opening_tag_end(markup) else {
        return (markup.to_string(), None);
    };
    let tag = &markup[..tag_end];

    let mut search = 0;
    while let Some(idx) = find_identifier(tag, key_attribute, search) {
        search = idx + key_attribute.len();
        if !tag[..idx].ends_with(char::is_whitespace) {
            continue;
        }
        let Some((key, value_end)) = attribute_value(markup, search) else {
            continue;
        };
        let attr_start = tag[..idx].trim_end().len();
        let remaining = format!("{}{}", &markup[..attr_start], &markup[value_end..]);
        return (remaining, Some(key));
    }

    (markup.to_string(), None)
}

/// Reads `= {expr}` or `= "text"` after an attribute name, returning the key
/// expression and the index just past the value.
fn attribute_value(markup: &str, name_end: usize) -> Option<(String, usize)> {
    let rest = markup[name_end..].trim_start().strip_prefix('=')?;
    let value = rest.trim_start();
    let value_start = markup.len() - value.len();

    match *value.as_bytes().first()? {
        b'{' => {
            let close = find_matching_raw(markup, value_start)?;
            Some((markup[value_start + 1..close].trim().to_string(), close + 1))
        }
        quote @ (b'"' | b'\'') => {
            let len = value[1..].find(quote as char)?;
            let end = value_start + len + 2;
            Some((markup[value_start..end].to_string(), end))
        }
        _ => None,
    }
}

/// Index of the `>` ending the first opening tag, ignoring `>` inside
/// attribute expressions and strings.
fn opening_tag_end(markup: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut quote = None;

    for (i, b) in markup.bytes().enumerate() {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            b'"' | b'\'' if depth == 0 => quote = Some(b),
            b'>' if depth == 0 => return Some(i),
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewrite(text: &str) -> String {
        rewrite_iterations(text, "key")
    }

    #[test]
    fn test_map_with_index_and_key() {
        assert_eq!(
            rewrite("{items.map((item, i) => (<li key={item.id}>{item.name}</li>))}"),
            "{#each items as item, i (item.id)}\n  <li>{item.name}</li>\n{/each}"
        );
    }

    #[test]
    fn test_map_without_key_or_parens() {
        assert_eq!(
            rewrite("<ul>\n  {todos.map(todo => <Todo {...todo} />)}\n</ul>"),
            "<ul>\n  {#each todos as todo}\n    <Todo {...todo} />\n  {/each}\n</ul>"
        );
    }

    #[test]
    fn test_block_body_callback() {
        let text = "{rows.map((row: Row) => {\n  return (\n    <tr key=\"static\">\n      <td>{row.a}</td>\n    </tr>\n  );\n})}";
        assert_eq!(
            rewrite(text),
            "{#each rows as row (\"static\")}\n  <tr>\n    <td>{row.a}</td>\n  </tr>\n{/each}"
        );
    }

    #[test]
    fn test_nested_maps() {
        let text = "{groups.map(g => (\n  <section key={g.id}>\n    {g.items.map(x => (<p>{x}</p>))}\n  </section>\n))}";
        assert_eq!(
            rewrite(text),
            "{#each groups as g (g.id)}\n  <section>\n    {#each g.items as x}\n      <p>{x}</p>\n    {/each}\n  </section>\n{/each}"
        );
    }

    #[test]
    fn test_chained_collection_and_optional() {
        assert_eq!(
            rewrite("{users.filter(u => u.active).map(u => <b>{u.name}</b>)}"),
            "{#each users.filter(u => u.active) as u}\n  <b>{u.name}</b>\n{/each}"
        );
        assert_eq!(
            rewrite("{list?.map(x => <i>{x}</i>)}"),
            "{#each list ?? [] as x}\n  <i>{x}</i>\n{/each}"
        );
    }

    #[test]
    fn test_non_markup_map_untouched() {
        let text = "<p>{names.map(n => n.toUpperCase()).join(', ')}</p>";
        assert_eq!(rewrite(text), text);
    }

    #[test]
    fn test_conditional_collections_left_alone() {
        let ternary = "{items.length === 0 ? <Empty /> : items.map(i => <li>{i}</li>)}";
        assert_eq!(rewrite(ternary), ternary);

        let guard = "{items.length > 0 && items.map(i => <li>{i}</li>)}";
        assert_eq!(rewrite(guard), guard);

        let fallback = "{(saved || defaults).map(d => <Row {...d} />)}";
        assert_eq!(
            rewrite(fallback),
            "{#each (saved || defaults) as d}\n  <Row {...d} />\n{/each}"
        );
    }

    #[test]
    fn test_single_operand() {
        assert!(is_single_operand("users.filter(u => u.age > 18 && u.active)"));
        assert!(is_single_operand("list?"));
        assert!(is_single_operand("a?.b[\"x:y\"]"));
        assert!(!is_single_operand("ok ? a : b"));
        assert!(!is_single_operand("a ?? b"));
        assert!(!is_single_operand("n > 0 && items"));
    }

    #[test]
    fn test_key_only_taken_from_root_tag() {
        let (markup, key) = take_key("<li data-key=\"a\" key={k}><b key={z} /></li>", "key");
        assert_eq!(markup, "<li data-key=\"a\"><b key={z} /></li>");
        assert_eq!(key.as_deref(), Some("k"));
    }
}
