use crate::options::MarkupOptions;
use once_cell::sync::Lazy;
use react_parser::scan::find_identifier;
use regex::Regex;

static FRAGMENT_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:(?:React\.)?Fragment\b[^>]*)?>").expect("valid fragment open regex")
});

static FRAGMENT_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</(?:(?:React\.)?Fragment\s*)?>").expect("valid fragment close regex")
});

/// Replaces fragment wrappers with `element`. Fragment attributes are dropped.
pub(super) fn rewrite_fragments(text: &str, element: &str) -> String {
    let open = format!("<{}>", element);
    let close = format!("</{}>", element);
    let text = FRAGMENT_OPEN.replace_all(text, regex::NoExpand(open.as_str()));
    FRAGMENT_CLOSE
        .replace_all(&text, regex::NoExpand(close.as_str()))
        .into_owned()
}

/// Applies the event and attribute rename tables.
pub(super) fn rename_attributes(text: &str, options: &MarkupOptions) -> String {
    options
        .events
        .iter()
        .chain(options.attributes.iter())
        .fold(text.to_string(), |text, (from, to)| rename_attribute(&text, from, to))
}

/// Renames every `from=` attribute to `to=`.
fn rename_attribute(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = 0;

    while let Some(idx) = find_identifier(text, from, search) {
        let after = idx + from.len();
        search = after;
        let rest = text[after..].trim_start();
        if rest.starts_with('=') && !rest.starts_with("==") && !rest.starts_with("=>") {
            out.push_str(&text[cursor..idx]);
            out.push_str(to);
            cursor = after;
        }
    }

    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fragments() {
        let text = "<>\n  <React.Fragment key={id}><a /></React.Fragment>\n  <Fragment><b /></Fragment>\n</>";
        assert_eq!(
            rewrite_fragments(text, "div"),
            "<div>\n  <div><a /></div>\n  <div><b /></div>\n</div>"
        );
    }

    #[test]
    fn test_fragment_prefix_is_not_a_fragment() {
        let text = "<FragmentList items={x} />";
        assert_eq!(rewrite_fragments(text, "div"), text);
    }

    #[test]
    fn test_custom_fragment_element() {
        assert_eq!(rewrite_fragments("<><p /></>", "section"), "<section><p /></section>");
    }

    #[test]
    fn test_event_and_attribute_renames() {
        let text = r#"<label htmlFor="name" className="x"><input onChange={e => setName(e.target.value)} onKeyDown={onKeyDown} /></label>"#;
        assert_eq!(
            rename_attributes(text, &MarkupOptions::default()),
            r#"<label for="name" class="x"><input onchange={e => setName(e.target.value)} onkeydown={onKeyDown} /></label>"#
        );
    }

    #[test]
    fn test_rename_requires_attribute_position() {
        let text = "<Item onClickOutside={close} data={props.onClick} />";
        assert_eq!(rename_attributes(text, &MarkupOptions::default()), text);
    }
}
