//! Markup, generation and pipeline settings.

use indexmap::IndexMap;
use react_parser::ExtractOptions;

const DEFAULT_EVENTS: [(&str, &str); 9] = [
    ("onClick", "onclick"),
    ("onChange", "onchange"),
    ("onSubmit", "onsubmit"),
    ("onFocus", "onfocus"),
    ("onBlur", "onblur"),
    ("onKeyDown", "onkeydown"),
    ("onKeyUp", "onkeyup"),
    ("onMouseOver", "onmouseover"),
    ("onMouseOut", "onmouseout"),
];

const DEFAULT_ATTRIBUTES: [(&str, &str); 2] = [("className", "class"), ("htmlFor", "for")];

fn table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Tunables for the markup passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Event attribute renames, applied in insertion order.
    pub events: IndexMap<String, String>,
    /// Other attribute renames.
    pub attributes: IndexMap<String, String>,
    /// Element that replaces fragments.
    pub fragment_element: String,
    /// Attribute lifted into the `{#each}` key.
    pub key_attribute: String,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            events: table(&DEFAULT_EVENTS),
            attributes: table(&DEFAULT_ATTRIBUTES),
            fragment_element: "div".to_string(),
            key_attribute: "key".to_string(),
        }
    }
}

/// Tunables for the document generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// `lang` attribute of the script tag. Empty omits the attribute and all
    /// type annotations the generator would add.
    pub script_lang: String,
    /// One indentation level inside the script tag.
    pub indent: String,
    /// Emit `// Props`, `// State`, `// Functions` and `// Effects` headers.
    pub section_comments: bool,
    /// Emit the surviving imports at the top of the script.
    pub emit_imports: bool,
    /// Precede each `$effect` with a comment naming its dependencies.
    pub effect_dependency_comments: bool,
}

impl GenerateOptions {
    /// Returns true when the script is TypeScript.
    pub fn is_typescript(&self) -> bool {
        self.script_lang == "ts"
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            script_lang: "ts".to_string(),
            indent: "  ".to_string(),
            section_comments: true,
            emit_imports: false,
            effect_dependency_comments: false,
        }
    }
}

/// Options for a whole transpilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranspileOptions {
    pub extract: ExtractOptions,
    pub markup: MarkupOptions,
    pub generate: GenerateOptions,
}
