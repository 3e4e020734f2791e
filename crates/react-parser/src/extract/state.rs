//! `useState` recognition.

use crate::ast::StateSlot;
use crate::scan::find_matching;
use once_cell::sync::Lazy;
use regex::{Match, Regex};

static STATE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:const|let|var)\s*\[\s*([A-Za-z_$][\w$]*)\s*,\s*([A-Za-z_$][\w$]*)\s*\]\s*=\s*(?:React\.)?useState\s*(?:<(.+?)>)?\s*\(",
    )
    .expect("valid useState regex")
});

/// Returns true when `code` declares local state.
pub(crate) fn declares_state(code: &str) -> bool {
    STATE_DECL.is_match(code)
}

/// A located state declaration.
struct StateDecl<'a> {
    whole: Match<'a>,
    /// Index of the closing paren of the `useState(...)` call.
    close: usize,
    slot: StateSlot,
}

fn state_declarations(code: &str) -> impl Iterator<Item = StateDecl<'_>> {
    STATE_DECL.captures_iter(code).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let open = whole.end() - 1;
        let Some(close) = find_matching(code, open) else {
            log::debug!("useState call at {} never closes", whole.start());
            return None;
        };
        Some(StateDecl {
            whole,
            close,
            slot: StateSlot {
                name: caps.get(1)?.as_str().into(),
                setter: caps.get(2)?.as_str().into(),
                type_text: caps.get(3).map(|m| m.as_str().trim().to_string()),
                initial_value: code[open + 1..close].trim().to_string(),
            },
        })
    })
}

/// Recovers every `const [value, setValue] = useState(init)` declaration.
pub(crate) fn extract_state(code: &str) -> Vec<StateSlot> {
    state_declarations(code).map(|decl| decl.slot).collect()
}

/// Removes whole state declaration statements from `code`.
pub(crate) fn strip_state_declarations(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut cursor = 0;

    for decl in state_declarations(code) {
        if decl.whole.start() < cursor {
            continue;
        }
        out.push_str(&code[cursor..decl.whole.start()]);
        let mut end = decl.close + 1;
        let rest = &code[end..];
        let trimmed = rest.trim_start_matches([' ', '\t']);
        end += rest.len() - trimmed.len();
        if trimmed.starts_with(';') {
            end += 1;
        }
        cursor = end;
    }
    out.push_str(&code[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_state() {
        let slots = extract_state("const [count, setCount] = useState(0);");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].name, "count");
        assert_eq!(slots[0].setter, "setCount");
        assert_eq!(slots[0].type_text, None);
        assert_eq!(slots[0].initial_value, "0");
    }

    #[test]
    fn test_typed_and_nested_initializer() {
        let code = "const [items, setItems] = useState<Array<Item>>(load(read('k'), []));";
        let slots = extract_state(code);
        assert_eq!(slots[0].type_text.as_deref(), Some("Array<Item>"));
        assert_eq!(slots[0].initial_value, "load(read('k'), [])");
    }

    #[test]
    fn test_multiline_object_initializer() {
        let code = "const [form, setForm] = React.useState({\n  name: '',\n  email: '',\n});";
        let slots = extract_state(code);
        assert_eq!(slots[0].name, "form");
        assert_eq!(slots[0].initial_value, "{\n  name: '',\n  email: '',\n}");
    }

    #[test]
    fn test_lazy_initializer_and_empty() {
        let code = "const [a, setA] = useState(() => compute());\nlet [b, setB] = useState();";
        let slots = extract_state(code);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].initial_value, "() => compute()");
        assert_eq!(slots[1].initial_value, "");
    }

    #[test]
    fn test_strip_declarations() {
        let code = "  const [a, setA] = useState(f(1));\n  doThing();\n";
        assert_eq!(strip_state_declarations(code), "  \n  doThing();\n");
    }

    #[test]
    fn test_declares_state() {
        assert!(declares_state("const [a, setA] = useState(1)"));
        assert!(!declares_state("const a = useRef(null)"));
    }
}
