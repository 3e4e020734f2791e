//! The end-to-end React to Svelte pipeline.

use crate::generate::generate_document;
use crate::indent::dedent;
use crate::options::TranspileOptions;
use crate::template::transform_markup;
use react_parser::setters::rewrite_setter_calls;
use react_parser::{extract_component, isolate_markup, ComponentModel, ParseError};
use thiserror::Error;

/// A transpilation that produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The result of transpiling one component.
#[derive(Debug, Clone)]
pub struct TranspileResult {
    /// The generated `.svelte` document.
    pub svelte_code: String,
    /// The model the document was generated from.
    pub component: ComponentModel,
}

/// Transpiles one React component source into a Svelte 5 component.
///
/// Fails only when the returned markup's parentheses never balance, in which
/// case nothing is generated.
pub fn transpile(
    source: &str,
    options: &TranspileOptions,
) -> Result<TranspileResult, TranspileError> {
    let isolated = isolate_markup(source)?;

    let mut component = extract_component(&isolated.declarations, &options.extract);
    component.markup_text = isolated.markup.to_string();

    let markup = dedent(isolated.markup).join("\n");
    let markup = transform_markup(&markup, &options.markup);
    let markup = rewrite_setter_calls(&markup, &component.state_slots);

    let svelte_code = generate_document(&component, &markup, &options.generate);
    Ok(TranspileResult {
        svelte_code,
        component,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use react_parser::ParseErrorKind;

    #[test]
    fn test_counter_end_to_end() {
        let source = r#"import React, { useState } from 'react';

interface CounterProps {
  label: string;
}

export default function Counter({ label }: CounterProps) {
  const [count, setCount] = useState(0);

  return (
    <button onClick={() => setCount(count + 1)}>{label}: {count}</button>
  );
}
"#;
        let result = transpile(source, &TranspileOptions::default()).unwrap();
        let expected = r#"<script lang="ts">
  // Props
  type Props = {
    label: string;
  };
  let { label }: Props = $props();

  // State
  let count = $state(0);
</script>

<button onclick={() => count = count + 1}>{label}: {count}</button>
"#;
        assert_eq!(result.svelte_code, expected);
        assert_eq!(result.component.name, "Counter");
    }

    #[test]
    fn test_unbalanced_source_fails() {
        let err = transpile("function A() { return ((<p/>); }", &TranspileOptions::default())
            .unwrap_err();
        let TranspileError::Parse(parse) = &err;
        assert_eq!(parse.kind, ParseErrorKind::UnbalancedDelimiter { depth: 1 });
        assert!(err.to_string().starts_with("could not match markup parentheses"));
    }

    #[test]
    fn test_source_without_markup() {
        let result = transpile("const [a, setA] = useState(1);", &TranspileOptions::default())
            .unwrap();
        assert_eq!(
            result.svelte_code,
            "<script lang=\"ts\">\n  // State\n  let a = $state(1);\n</script>\n"
        );
    }
}
