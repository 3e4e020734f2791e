//! Rewrites state setter calls into plain assignments.
//!
//! `setCount(count + 1)` becomes `count = count + 1` and the functional
//! updater form `setUser(prev => ({ ...prev, active: true }))` becomes
//! `user = { ...user, active: true }`.
//!
//! Call boundaries are recomputed after every replacement, so calls nested in
//! another setter's argument are rewritten too. Updater parameters are
//! substituted textually; a nested scope that shadows the parameter name is
//! rewritten as well.

use crate::ast::StateSlot;
use crate::scan::{find_identifier, find_matching, replace_identifier, strip_wrapping_parens};
use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

static UPDATER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?s)(?:\(\s*([A-Za-z_$][\w$]*)\s*(?::[^)]*)?\)|([A-Za-z_$][\w$]*))\s*=>\s*(.*)$",
    )
    .expect("valid updater regex")
});

static RETURN_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?s)\{\s*return\s+(.*?);?\s*\}$").expect("valid return block regex")
});

/// Maps setter names to the state slot they update.
#[derive(Debug, Clone, Default)]
pub struct SetterTable {
    entries: Vec<(String, SmolStr)>,
}

impl SetterTable {
    /// Builds a table from state slots, registering both the declared setter
    /// and the conventional `set` + capitalized-name form.
    pub fn from_slots(slots: &[StateSlot]) -> Self {
        let mut entries: Vec<(String, SmolStr)> = Vec::new();
        for slot in slots {
            for setter in [slot.setter.to_string(), slot.conventional_setter()] {
                if !entries.iter().any(|(name, _)| *name == setter) {
                    entries.push((setter, slot.name.clone()));
                }
            }
        }
        Self { entries }
    }

    /// Returns true when no setter is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the earliest setter call at or after `from`.
    ///
    /// Returns the call start, the index of its opening paren and the slot.
    fn next_call(&self, text: &str, from: usize) -> Option<(usize, usize, SmolStr)> {
        let mut best: Option<(usize, usize, SmolStr)> = None;

        for (setter, slot) in &self.entries {
            let mut search = from;
            while let Some(idx) = find_identifier(text, setter, search) {
                let after = idx + setter.len();
                let gap = text[after..].len() - text[after..].trim_start().len();
                if text[after + gap..].starts_with('(') {
                    if best.as_ref().map_or(true, |(b, _, _)| idx < *b) {
                        best = Some((idx, after + gap, slot.clone()));
                    }
                    break;
                }
                search = after;
            }
        }

        best
    }
}

/// Rewrites every recognized setter call in `body`.
pub fn rewrite_setter_calls(body: &str, slots: &[StateSlot]) -> String {
    let table = SetterTable::from_slots(slots);
    rewrite_with_table(body, &table)
}

/// Rewrites every setter call in `body` using a prebuilt table.
pub fn rewrite_with_table(body: &str, table: &SetterTable) -> String {
    if table.is_empty() {
        return body.to_string();
    }

    let mut text = body.to_string();
    let mut cursor = 0;

    while let Some((start, open, slot)) = table.next_call(&text, cursor) {
        let Some(close) = find_matching(&text, open) else {
            log::trace!("setter call at {} has no closing paren", start);
            cursor = open + 1;
            continue;
        };

        let argument = text[open + 1..close].trim();
        let resolved = resolve_argument(argument, &slot);
        log::trace!("rewrote setter call for `{}`", slot);

        let prefix = format!("{} = ", slot);
        let replacement = format!("{}{}", prefix, resolved);
        text.replace_range(start..=close, &replacement);

        // Continue inside the argument so nested setter calls are found.
        cursor = start + prefix.len();
    }

    text
}

/// Resolves a setter argument to the value expression it assigns.
fn resolve_argument(argument: &str, slot: &str) -> String {
    let Some(caps) = UPDATER.captures(argument) else {
        return argument.to_string();
    };

    let param = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default();
    let mut expr = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();

    if expr.starts_with('{') {
        match RETURN_BLOCK.captures(expr).and_then(|c| c.get(1)) {
            Some(ret) => expr = ret.as_str().trim(),
            // A block body that is not a single return is not an updater we
            // can express as an assignment.
            None => return argument.to_string(),
        }
    }

    let expr = strip_wrapping_parens(expr);
    replace_identifier(expr, param, slot)
}
