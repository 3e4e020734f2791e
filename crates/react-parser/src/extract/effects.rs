//! `useEffect` recognition.

use crate::ast::Effect;
use crate::scan::{find_matching, split_top_level};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static EFFECT_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:React\.)?\buseEffect\s*\(\s*(?:async\s*)?\(\s*\)\s*=>\s*\{")
        .expect("valid useEffect regex")
});

/// Returns true when `code` declares an effect.
pub(crate) fn declares_effect(code: &str) -> bool {
    EFFECT_CALL.is_match(code)
}

/// A recognized effect call located in the source.
struct EffectCall {
    /// Byte range of the callback body, between its braces.
    body: Range<usize>,
    dependencies: Vec<String>,
}

fn effect_calls(code: &str) -> Vec<EffectCall> {
    let mut calls = Vec::new();
    let mut from = 0;

    while let Some(m) = EFFECT_CALL.find_at(code, from) {
        from = m.end();
        let open = m.end() - 1;
        let Some(close) = find_matching(code, open) else {
            log::debug!("effect body at {} never closes", m.start());
            continue;
        };
        from = close + 1;

        match dependency_list(code, close + 1) {
            Some(dependencies) => calls.push(EffectCall {
                body: open + 1..close,
                dependencies,
            }),
            None => log::debug!("effect at {} has no dependency list; skipped", m.start()),
        }
    }

    calls
}

/// Recovers `useEffect(() => { ... }, [deps])` blocks in source order.
///
/// An effect without a dependency list is not recognized.
pub(crate) fn extract_effects(code: &str) -> Vec<Effect> {
    effect_calls(code)
        .into_iter()
        .map(|call| Effect {
            body: code[call.body].trim().to_string(),
            dependencies: call.dependencies,
        })
        .collect()
}

/// Byte ranges of the bodies of recognized effects.
pub(crate) fn effect_bodies(code: &str) -> Vec<Range<usize>> {
    effect_calls(code).into_iter().map(|call| call.body).collect()
}

/// Parses `, [a, b])` starting right after the callback body.
fn dependency_list(code: &str, after_body: usize) -> Option<Vec<String>> {
    let rest = &code[after_body..];
    let rest_trimmed = rest.trim_start().strip_prefix(',')?;
    let bracket_rel = rest_trimmed.find(|c: char| !c.is_whitespace())?;
    if !rest_trimmed[bracket_rel..].starts_with('[') {
        return None;
    }
    let bracket = code.len() - rest_trimmed.len() + bracket_rel;
    let close = find_matching(code, bracket)?;
    if !code[close + 1..].trim_start().starts_with(')') {
        return None;
    }

    Some(
        split_top_level(&code[bracket + 1..close], |c| c == ',', false)
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}
