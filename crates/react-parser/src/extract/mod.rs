//! Structural extraction over markup-free declaration code.
//!
//! Every recognizer is total: a miss contributes nothing to the model.

mod effects;
mod functions;
mod imports;
mod name;
mod props;
mod state;

use crate::ast::{ComponentModel, Effect};
use crate::options::ExtractOptions;
use crate::setters::{rewrite_with_table, SetterTable};

/// Builds a component model from declaration code.
///
/// `markup_text` on the returned model is left empty; [`crate::parse`] fills
/// it from the isolated span.
pub fn extract_component(declarations: &str, options: &ExtractOptions) -> ComponentModel {
    let recognized_name = name::extract_component_name(declarations);
    if recognized_name.is_none() {
        log::debug!(
            "no component declaration found; using `{}`",
            options.default_component_name
        );
    }

    let imports = imports::extract_imports(declarations, &options.excluded_import_sources);
    let inputs = props::extract_props(declarations, recognized_name.as_deref(), options);
    let state_slots = state::extract_state(declarations);
    let setters = SetterTable::from_slots(&state_slots);
    let effects = effects::extract_effects(declarations)
        .into_iter()
        .map(|effect| Effect {
            body: rewrite_with_table(&effect.body, &setters),
            ..effect
        })
        .collect::<Vec<_>>();

    let name = recognized_name.unwrap_or_else(|| options.default_component_name.clone());
    let functions = functions::extract_functions(declarations, &name, &setters);

    log::debug!(
        "extracted `{}`: {} inputs, {} state, {} effects, {} functions, {} imports",
        name,
        inputs.len(),
        state_slots.len(),
        effects.len(),
        functions.len(),
        imports.len()
    );

    ComponentModel {
        name: name.into(),
        inputs,
        state_slots,
        effects,
        functions,
        imports,
        markup_text: String::new(),
    }
}
