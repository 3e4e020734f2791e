//! JSX markup to Svelte template rewriting.
//!
//! The markup is never parsed into a tree. It goes through a fixed sequence of
//! textual passes, each of which assumes the earlier ones already ran:
//!
//! 1. comments: `{/* x */}` becomes `<!-- x -->`, stray JS comments are dropped
//! 2. fragments: `<>`, `<Fragment>` and `<React.Fragment>` become a container element
//! 3. attributes: event and attribute names are renamed from the option tables
//! 4. iteration: `{items.map(item => (...))}` becomes `{#each}`
//! 5. conditionals: ternaries and `&&` guards become `{#if}`
//!
//! A pass that finds nothing to rewrite returns its input unchanged. Passes are
//! not idempotent and are never re-run to a fixed point.

mod attributes;
mod comments;
mod each_block;
mod if_block;

use crate::indent::indent_lines;
use crate::options::MarkupOptions;
use react_parser::scan::find_matching_raw;

/// Indentation added for each block nesting level.
const BLOCK_INDENT: &str = "  ";

/// One step of the markup pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupPass {
    Comments,
    Fragments,
    Attributes,
    Iteration,
    Conditionals,
}

impl MarkupPass {
    /// The order passes run in.
    pub const ORDER: [MarkupPass; 5] = [
        MarkupPass::Comments,
        MarkupPass::Fragments,
        MarkupPass::Attributes,
        MarkupPass::Iteration,
        MarkupPass::Conditionals,
    ];

    /// Name used when logging which passes changed the markup.
    pub fn name(self) -> &'static str {
        match self {
            MarkupPass::Comments => "comments",
            MarkupPass::Fragments => "fragments",
            MarkupPass::Attributes => "attributes",
            MarkupPass::Iteration => "iteration",
            MarkupPass::Conditionals => "conditionals",
        }
    }

    /// Runs this pass alone over `text`.
    pub fn apply(self, text: &str, options: &MarkupOptions) -> String {
        match self {
            MarkupPass::Comments => comments::rewrite_comments(text),
            MarkupPass::Fragments => attributes::rewrite_fragments(text, &options.fragment_element),
            MarkupPass::Attributes => attributes::rename_attributes(text, options),
            MarkupPass::Iteration => each_block::rewrite_iterations(text, &options.key_attribute),
            MarkupPass::Conditionals => {
                if_block::rewrite_conditionals(text, &options.key_attribute)
            }
        }
    }
}

/// Rewrites JSX markup into Svelte template markup.
pub fn transform_markup(markup: &str, options: &MarkupOptions) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    MarkupPass::ORDER
        .iter()
        .fold(markup.to_string(), |text, pass| {
            let out = pass.apply(&text, options);
            if out != text {
                log::debug!("markup pass `{}` rewrote the markup", pass.name());
            }
            out
        })
}

/// Returns the markup inside `expr` when it is `<...>` or `(<...>)`.
fn as_markup(expr: &str) -> Option<&str> {
    let expr = expr.trim();
    let inner = if expr.starts_with('(') && find_matching_raw(expr, 0) == Some(expr.len() - 1) {
        expr[1..expr.len() - 1].trim()
    } else {
        expr
    };
    (inner.starts_with('<') && inner.ends_with('>')).then_some(inner)
}

/// Calls `rewrite` for every `{...}` expression in `text`, replacing the whole
/// braced expression when it returns a replacement.
///
/// Scanning resumes after a replacement, so `rewrite` is responsible for any
/// nested rewriting of the bodies it embeds.
fn rewrite_braced<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut text = text.to_string();
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find('{') {
        let open = cursor + rel;
        let Some(close) = find_matching_raw(&text, open) else {
            cursor = open + 1;
            continue;
        };

        let indent = crate::indent::line_indent(&text, open).to_string();
        match rewrite(text[open + 1..close].trim(), &indent) {
            Some(replacement) => {
                text.replace_range(open..=close, &replacement);
                cursor = open + replacement.len();
            }
            None => cursor = open + 1,
        }
    }

    text
}

/// Lays out a block: each `(header, body)` pair opens a section, `footer`
/// closes the block. The first header lands where the expression was.
fn render_block(sections: &[(String, String)], footer: &str, indent: &str) -> String {
    let body_prefix = format!("{}{}", indent, BLOCK_INDENT);
    let mut out = String::new();

    for (i, (header, body)) in sections.iter().enumerate() {
        if i > 0 {
            out.push_str(indent);
        }
        out.push_str(header);
        out.push('\n');
        out.push_str(&indent_lines(body, &body_prefix, false));
    }
    out.push_str(indent);
    out.push_str(footer);
    out
}
