//! Helper function recognition.
//!
//! Two shapes are recognized: an arrow function with a block body bound to a
//! name, and a named `function` declaration. Candidates are reported in source
//! order, skipping the component itself, anything that declares state or
//! effects, helpers nested inside another accepted helper, and helpers local
//! to an effect body.

use super::effects::{declares_effect, effect_bodies};
use super::state::{declares_state, strip_state_declarations};
use crate::ast::HelperFunction;
use crate::scan::{drop_blank_lines, find_matching};
use crate::setters::{rewrite_with_table, SetterTable};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ARROW_HELPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+?)?=\s*(async\s+)?(?:\(([^)]*)\)|([A-Za-z_$][\w$]*))\s*(?::\s*[^={]+?)?=>\s*\{",
    )
    .expect("valid arrow helper regex")
});

static FUNCTION_HELPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(async\s+)?\bfunction\s+([A-Za-z_$][\w$]*)\s*(?:<[^>(]*>)?\s*\(([^)]*)\)\s*(?::\s*[^{]+?)?\{",
    )
    .expect("valid function helper regex")
});

/// A helper located in the source before filtering.
struct Candidate {
    start: usize,
    /// Index of the body's closing brace.
    end: usize,
    name: String,
    params: String,
    body: String,
    is_async: bool,
}

/// Builds a candidate from a regex match. Group indices differ per shape.
fn candidate(
    code: &str,
    caps: &Captures<'_>,
    name: usize,
    params: &[usize],
    is_async: usize,
) -> Option<Candidate> {
    let whole = caps.get(0)?;
    let open = whole.end() - 1;
    let close = find_matching(code, open)?;
    let params = params
        .iter()
        .find_map(|&group| caps.get(group))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(Candidate {
        start: whole.start(),
        end: close,
        name: caps.get(name)?.as_str().to_string(),
        params,
        body: code[open + 1..close].to_string(),
        is_async: caps.get(is_async).is_some(),
    })
}

/// Recovers helper functions, rewriting setter calls in their bodies.
pub(crate) fn extract_functions(
    code: &str,
    component_name: &str,
    setters: &SetterTable,
) -> Vec<HelperFunction> {
    let mut candidates: Vec<Candidate> = ARROW_HELPER
        .captures_iter(code)
        .filter_map(|caps| candidate(code, &caps, 1, &[3, 4], 2))
        .chain(
            FUNCTION_HELPER
                .captures_iter(code)
                .filter_map(|caps| candidate(code, &caps, 2, &[3], 1)),
        )
        .collect();
    candidates.sort_by_key(|c| c.start);

    let effects = effect_bodies(code);
    let mut accepted_until = 0;
    let mut functions = Vec::new();

    for candidate in candidates {
        if candidate.name == component_name {
            continue;
        }
        if candidate.start < accepted_until {
            log::trace!("helper `{}` is nested in another helper", candidate.name);
            continue;
        }
        if effects.iter().any(|body| body.contains(&candidate.start)) {
            log::trace!("helper `{}` is local to an effect", candidate.name);
            continue;
        }
        if declares_state(&candidate.body) || declares_effect(&candidate.body) {
            log::debug!("`{}` declares hooks; not a helper", candidate.name);
            continue;
        }

        accepted_until = candidate.end;
        let body = strip_state_declarations(&candidate.body);
        let body = rewrite_with_table(&body, setters);
        functions.push(HelperFunction {
            name: candidate.name.into(),
            params: candidate.params,
            body: drop_blank_lines(&body),
            is_async: candidate.is_async,
        });
    }

    functions
}
