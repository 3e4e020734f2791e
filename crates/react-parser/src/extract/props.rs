//! Props recognition.
//!
//! Supported patterns, in precedence order:
//! - `function Button({ label, size = 10 }: ButtonProps)` and the arrow form
//!   `const Button = ({ label }: { label: string }) => ...`
//! - `const { label, size = 10 } = props;`
//! - `interface ButtonProps { label: string; size?: number }` or the `type` alias

use crate::ast::InputParam;
use crate::options::ExtractOptions;
use crate::scan::{find_assignment, find_matching, is_identifier, split_top_level};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

static BODY_DESTRUCTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:const|let|var)\s*\{").expect("valid destructuring regex")
});

static PROPS_RHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?::[^=]+?)?=\s*props\b").expect("valid props rhs regex")
});

static TYPE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:interface|type)\s+([A-Za-z_$][\w$]*)\s*(?:<[^>{]*>)?\s*(?:extends\s+[^{]+?)?\s*=?\s*\{",
    )
    .expect("valid type block regex")
});

static TYPE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?s)(?:readonly\s+)?([A-Za-z_$][\w$]*)(\?)?\s*:\s*(.+)$")
        .expect("valid type entry regex")
});

/// A prop found by one recognizer before merging.
#[derive(Debug, Clone)]
struct PropCandidate {
    name: String,
    type_text: Option<String>,
    default_value: Option<String>,
    optional: bool,
}

/// Accumulates props in first-seen order, unique by name.
struct PropsBuilder<'o> {
    props: Vec<InputParam>,
    index: FxHashMap<SmolStr, usize>,
    options: &'o ExtractOptions,
}

impl<'o> PropsBuilder<'o> {
    fn new(options: &'o ExtractOptions) -> Self {
        Self {
            props: Vec::new(),
            index: FxHashMap::default(),
            options,
        }
    }

    /// Adds a candidate. An existing entry keeps its identity and default; a
    /// later recognizer may only fill in an unknown type and the `?` marker.
    fn add(&mut self, candidate: PropCandidate) {
        if let Some(&idx) = self.index.get(candidate.name.as_str()) {
            let existing = &mut self.props[idx];
            if existing.type_text == self.options.default_type {
                if let Some(type_text) = candidate.type_text {
                    existing.type_text = type_text;
                }
            }
            existing.optional |= candidate.optional && candidate.default_value.is_none();
            log::trace!("prop `{}` already recorded; supplemented only", candidate.name);
            return;
        }

        let name = SmolStr::new(&candidate.name);
        self.index.insert(name.clone(), self.props.len());
        self.props.push(InputParam {
            name,
            type_text: candidate
                .type_text
                .unwrap_or_else(|| self.options.default_type.clone()),
            optional: candidate.optional || candidate.default_value.is_some(),
            default_value: candidate.default_value,
        });
    }

    fn finish(self) -> Vec<InputParam> {
        self.props
    }
}

/// Recovers the component's props from all three recognizers.
pub(crate) fn extract_props(
    code: &str,
    component_name: Option<&str>,
    options: &ExtractOptions,
) -> Vec<InputParam> {
    let mut builder = PropsBuilder::new(options);

    let header = component_name.and_then(|name| parse_header(code, name));
    let annotated_type = header.as_ref().and_then(|h| h.named_type.clone());

    if let Some(header) = header {
        log::debug!("props header: {} destructured", header.props.len());
        for candidate in header.props {
            builder.add(candidate);
        }
    }

    for candidate in parse_body_destructuring(code) {
        builder.add(candidate);
    }

    for candidate in parse_type_block(code, annotated_type.as_deref(), options) {
        builder.add(candidate);
    }

    builder.finish()
}

/// Destructured parameters found in the component header.
struct Header {
    props: Vec<PropCandidate>,
    /// A named type annotation such as `ButtonProps`.
    named_type: Option<String>,
}

fn parse_header(code: &str, component_name: &str) -> Option<Header> {
    let name = regex::escape(component_name);
    let pattern = format!(
        r"(?:function\s+{name}\s*(?:<[^>(]*>)?\s*\(|(?:const|let|var)\s+{name}\s*(?::[^=]+?)?=\s*(?:async\s+)?\()"
    );
    let re = Regex::new(&pattern).ok()?;
    let open_paren = re.find(code)?.end() - 1;
    let close_paren = find_matching(code, open_paren)?;
    let params = &code[open_paren + 1..close_paren];

    let brace_rel = params.find(|c: char| !c.is_whitespace())?;
    if !params[brace_rel..].starts_with('{') {
        return None;
    }
    let brace_close_rel = find_matching(params, brace_rel)?;
    let mut props = parse_destructured_entries(&params[brace_rel + 1..brace_close_rel]);

    let annotation = params[brace_close_rel + 1..]
        .trim()
        .strip_prefix(':')
        .map(str::trim)
        .unwrap_or_default();

    let mut named_type = None;
    if annotation.starts_with('{') {
        if let Some(end) = find_matching(annotation, 0) {
            let types = parse_type_entries(&annotation[1..end]);
            for prop in &mut props {
                if let Some(entry) = types.iter().find(|t| t.name == prop.name) {
                    prop.type_text = entry.type_text.clone();
                    prop.optional |= entry.optional;
                }
            }
        }
    } else if is_identifier(annotation) {
        named_type = Some(annotation.to_string());
    }

    Some(Header { props, named_type })
}

fn parse_body_destructuring(code: &str) -> Vec<PropCandidate> {
    for m in BODY_DESTRUCTURE.find_iter(code) {
        let open = m.end() - 1;
        let Some(close) = find_matching(code, open) else {
            continue;
        };
        if PROPS_RHS.is_match(&code[close + 1..]) {
            return parse_destructured_entries(&code[open + 1..close]);
        }
    }
    Vec::new()
}

/// Parses `a, b = 1, c: alias = f(x)` destructuring entries.
fn parse_destructured_entries(content: &str) -> Vec<PropCandidate> {
    let mut props = Vec::new();

    for entry in split_top_level(content, |c| c == ',', false) {
        if entry.starts_with("...") {
            log::trace!("skipping rest element `{}`", entry);
            continue;
        }

        let (binding, default_value) = match find_assignment(entry) {
            Some(eq) => (entry[..eq].trim(), Some(entry[eq + 1..].trim().to_string())),
            None => (entry, None),
        };

        // `label: text` renames the local; the prop is still `label`.
        let name = binding.split(':').next().unwrap_or_default().trim();
        if !is_identifier(name) {
            continue;
        }

        props.push(PropCandidate {
            name: name.to_string(),
            type_text: None,
            optional: default_value.is_some(),
            default_value,
        });
    }

    props
}

fn parse_type_block(
    code: &str,
    preferred_name: Option<&str>,
    options: &ExtractOptions,
) -> Vec<PropCandidate> {
    let mut fallback = None;

    for caps in TYPE_BLOCK.captures_iter(code) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let is_preferred = preferred_name == Some(name.as_str());
        let has_suffix = name.as_str().ends_with(options.props_type_suffix.as_str());
        if !is_preferred && !has_suffix {
            continue;
        }

        let open = whole.end() - 1;
        let Some(close) = find_matching(code, open) else {
            continue;
        };
        let body = &code[open + 1..close];

        if is_preferred {
            return parse_type_entries(body);
        }
        if fallback.is_none() {
            fallback = Some(body);
        }
    }

    fallback.map(parse_type_entries).unwrap_or_default()
}

/// Parses the members of an object type, one per line or `;`/`,` separator.
fn parse_type_entries(body: &str) -> Vec<PropCandidate> {
    let mut props = Vec::new();

    for entry in split_top_level(body, |c| matches!(c, '\n' | ';' | ','), true) {
        if entry.starts_with("//") || entry.starts_with("/*") || entry.starts_with('*') {
            continue;
        }
        let Some(caps) = TYPE_ENTRY.captures(entry) else {
            continue;
        };
        let (Some(name), Some(type_text)) = (caps.get(1), caps.get(3)) else {
            continue;
        };

        let type_text = strip_trailing_comment(type_text.as_str())
            .trim_end_matches(|c: char| c == ';' || c == ',')
            .trim();
        props.push(PropCandidate {
            name: name.as_str().to_string(),
            type_text: Some(type_text.to_string()),
            default_value: None,
            optional: caps.get(2).is_some(),
        });
    }

    props
}

fn strip_trailing_comment(text: &str) -> &str {
    match text.find("//") {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    }
}
