//! Component name recognition.

use once_cell::sync::Lazy;
use regex::Regex;

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:export\s+(?:default\s+)?)?(?:async\s+)?function\s+([A-Za-z_$][\w$]*)")
        .expect("valid function declaration regex")
});

static ARROW_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+?)?=\s*(?:async\s+)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=]+?)?=>",
    )
    .expect("valid arrow declaration regex")
});

/// Recovers the component name.
///
/// Named function declarations win over arrow assignments. Within each form a
/// capitalized name is preferred, otherwise the first match is taken.
pub(crate) fn extract_component_name(code: &str) -> Option<String> {
    first_preferring_capitalized(&FUNCTION_DECL, code)
        .or_else(|| first_preferring_capitalized(&ARROW_DECL, code))
}

fn first_preferring_capitalized(re: &Regex, code: &str) -> Option<String> {
    let mut first = None;
    for caps in re.captures_iter(code) {
        let Some(name) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if name.starts_with(|c: char| c.is_uppercase()) {
            return Some(name.to_string());
        }
        if first.is_none() {
            first = Some(name.to_string());
        }
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_default_function() {
        let code = "export default function Counter({ start }) {\n}";
        assert_eq!(extract_component_name(code).as_deref(), Some("Counter"));
    }

    #[test]
    fn test_function_beats_arrow() {
        let code = "const Helper = () => 1;\nfunction Card() {}";
        assert_eq!(extract_component_name(code).as_deref(), Some("Card"));
    }

    #[test]
    fn test_typed_arrow() {
        let code = "export const Badge: React.FC<BadgeProps> = ({ label }) => {\n};";
        assert_eq!(extract_component_name(code).as_deref(), Some("Badge"));
    }

    #[test]
    fn test_capitalized_arrow_preferred() {
        let code = "const format = (d) => d.toString();\nconst Clock = () => {\n};";
        assert_eq!(extract_component_name(code).as_deref(), Some("Clock"));
    }

    #[test]
    fn test_no_declaration() {
        assert_eq!(extract_component_name("let x = 1;"), None);
    }
}
