//! Pattern-driven extraction of React function components.
//!
//! This crate recovers a structural [`ComponentModel`] from a single React
//! component source without a full JavaScript grammar:
//! - [`isolate_markup`] splits the returned markup from the declaration code
//! - [`extract_component`] runs the recognizers for name, props, state,
//!   effects, helpers and imports
//! - [`setters`] rewrites `setX(...)` calls into assignments
//!
//! # Example
//!
//! ```
//! use react_parser::parse;
//!
//! let source = r#"
//! export default function Counter({ start = 0 }) {
//!     const [count, setCount] = useState(start);
//!     return (
//!         <button onClick={() => setCount(count + 1)}>{count}</button>
//!     );
//! }
//! "#;
//!
//! let model = parse(source).unwrap();
//! assert_eq!(model.name, "Counter");
//! assert_eq!(model.state_slots[0].initial_value, "start");
//! ```

mod ast;
mod error;
mod extract;
mod isolate;
mod options;
pub mod scan;
pub mod setters;

pub use ast::{ComponentModel, Effect, HelperFunction, InputParam, StateSlot};
pub use error::{ParseError, ParseErrorKind};
pub use extract::extract_component;
pub use isolate::{isolate_markup, Isolated};
pub use options::ExtractOptions;
pub use text_size::{TextRange, TextSize};

/// Parses a component source with the default options.
pub fn parse(source: &str) -> Result<ComponentModel, ParseError> {
    parse_with_options(source, &ExtractOptions::default())
}

/// Parses a component source.
///
/// Fails only when the returned markup's parentheses never balance.
pub fn parse_with_options(
    source: &str,
    options: &ExtractOptions,
) -> Result<ComponentModel, ParseError> {
    let isolated = isolate_markup(source)?;
    let mut model = extract_component(&isolated.declarations, options);
    model.markup_text = isolated.markup.to_string();
    Ok(model)
}
