//! Svelte 5 document generation.
//!
//! The script segment holds, in order: imports (opt-in), props, state,
//! helper functions and effects. Sections without entries are left out.

use crate::indent::indent_lines;
use crate::options::GenerateOptions;
use react_parser::{ComponentModel, Effect, HelperFunction, InputParam, StateSlot};

/// Collects the lines of one script section.
struct Section<'o> {
    out: String,
    options: &'o GenerateOptions,
}

impl<'o> Section<'o> {
    fn new(title: &str, options: &'o GenerateOptions) -> Self {
        let mut section = Self {
            out: String::new(),
            options,
        };
        if options.section_comments {
            section.line(1, &format!("// {}", title));
        }
        section
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(&self.options.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn body(&mut self, text: &str) {
        let prefix = self.options.indent.repeat(2);
        self.out.push_str(&indent_lines(text, &prefix, false));
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Serializes a component model and its transformed markup.
pub fn generate_document(
    component: &ComponentModel,
    markup: &str,
    options: &GenerateOptions,
) -> String {
    let mut sections = Vec::new();

    if options.emit_imports && !component.imports.is_empty() {
        sections.push(imports_section(&component.imports, options));
    }
    if !component.inputs.is_empty() {
        sections.push(props_section(&component.inputs, options));
    }
    if !component.state_slots.is_empty() {
        sections.push(state_section(&component.state_slots, options));
    }
    if !component.functions.is_empty() {
        sections.push(functions_section(&component.functions, options));
    }
    if !component.effects.is_empty() {
        sections.push(effects_section(&component.effects, options));
    }

    let mut out = String::new();
    if options.script_lang.is_empty() {
        out.push_str("<script>\n");
    } else {
        out.push_str(&format!("<script lang=\"{}\">\n", options.script_lang));
    }
    out.push_str(&sections.join("\n"));
    out.push_str("</script>\n");

    if !markup.is_empty() {
        out.push('\n');
        out.push_str(markup);
        out.push('\n');
    }

    out
}

fn imports_section(imports: &[String], options: &GenerateOptions) -> String {
    let mut section = Section {
        out: String::new(),
        options,
    };
    for import in imports {
        section.line(1, &format!("{};", import));
    }
    section.finish()
}

fn props_section(inputs: &[InputParam], options: &GenerateOptions) -> String {
    let mut section = Section::new("Props", options);
    let typed = options.is_typescript();

    if typed {
        section.line(1, "type Props = {");
        for input in inputs {
            let marker = if input.optional { "?" } else { "" };
            section.line(2, &format!("{}{}: {};", input.name, marker, input.type_text));
        }
        section.line(1, "};");
    }

    let bindings: Vec<String> = inputs
        .iter()
        .map(|input| match &input.default_value {
            Some(default) => format!("{} = {}", input.name, default),
            None => input.name.to_string(),
        })
        .collect();
    let annotation = if typed { ": Props" } else { "" };
    section.line(
        1,
        &format!("let {{ {} }}{} = $props();", bindings.join(", "), annotation),
    );
    section.finish()
}

fn state_section(slots: &[StateSlot], options: &GenerateOptions) -> String {
    let mut section = Section::new("State", options);
    for slot in slots {
        let generic = match &slot.type_text {
            Some(type_text) if options.is_typescript() => format!("<{}>", type_text),
            _ => String::new(),
        };
        section.line(
            1,
            &format!("let {} = $state{}({});", slot.name, generic, slot.initial_value),
        );
    }
    section.finish()
}

fn functions_section(functions: &[HelperFunction], options: &GenerateOptions) -> String {
    let mut section = Section::new("Functions", options);
    for (i, function) in functions.iter().enumerate() {
        if i > 0 {
            section.out.push('\n');
        }
        let prefix = if function.is_async { "async " } else { "" };
        section.line(
            1,
            &format!("{}function {}({}) {{", prefix, function.name, function.params),
        );
        section.body(&function.body);
        section.line(1, "}");
    }
    section.finish()
}

fn effects_section(effects: &[Effect], options: &GenerateOptions) -> String {
    let mut section = Section::new("Effects", options);
    for (i, effect) in effects.iter().enumerate() {
        if i > 0 {
            section.out.push('\n');
        }
        if options.effect_dependency_comments {
            let note = if effect.dependencies.is_empty() {
                "// runs once".to_string()
            } else {
                format!("// depends on: {}", effect.dependencies.join(", "))
            };
            section.line(1, &note);
        }
        section.line(1, "$effect(() => {");
        section.body(&effect.body);
        section.line(1, "});");
    }
    section.finish()
}
