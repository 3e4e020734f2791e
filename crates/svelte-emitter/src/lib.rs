//! Svelte 5 output for transpiled React components.
//!
//! This crate turns the model recovered by `react-parser` into a `.svelte`
//! document:
//! - [`transform_markup`] rewrites JSX markup into Svelte template syntax
//! - [`generate_document`] serializes the script and markup segments
//! - [`transpile`] runs the whole pipeline on one source
//!
//! # Example
//!
//! ```
//! use svelte_emitter::{transpile, TranspileOptions};
//!
//! let source = r#"
//! export default function Toggle() {
//!     const [on, setOn] = useState(false);
//!     return (
//!         <button className="toggle" onClick={() => setOn(!on)}>
//!             {on ? <b>On</b> : <i>Off</i>}
//!         </button>
//!     );
//! }
//! "#;
//!
//! let result = transpile(source, &TranspileOptions::default()).unwrap();
//! assert!(result.svelte_code.contains("let on = $state(false);"));
//! assert!(result.svelte_code.contains("onclick={() => on = !on}"));
//! assert!(result.svelte_code.contains("{#if on}"));
//! ```

mod generate;
mod indent;
mod options;
mod template;
mod transform;

pub use generate::generate_document;
pub use options::{GenerateOptions, MarkupOptions, TranspileOptions};
pub use template::{transform_markup, MarkupPass};
pub use transform::{transpile, TranspileError, TranspileResult};
