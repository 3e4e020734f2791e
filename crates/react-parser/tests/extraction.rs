//! End-to-end extraction tests over realistic component sources.

use pretty_assertions::assert_eq;
use react_parser::{isolate_markup, parse, InputParam, ParseErrorKind};

const TODO_LIST: &str = r#"import React, { useState, useEffect } from 'react';
import { v4 as uuid } from 'uuid';
import './TodoList.css';

interface TodoListProps {
  title: string;
  initialItems?: string[];
  onChange?: (items: string[]) => void;
}

export default function TodoList({ title, initialItems = [] }: TodoListProps) {
  const [items, setItems] = useState<string[]>(initialItems);
  const [draft, setDraft] = useState('');

  useEffect(() => {
    localStorage.setItem('todos', JSON.stringify(items));
  }, [items]);

  const addItem = () => {
    setItems(prev => [...prev, draft]);
    setDraft('');
  };

  async function sync(id: string) {
    await api.put(id, items);
  }

  return (
    <div className="todo">
      <h2>{title}</h2>
      <ul>
        {items.map((item, i) => (
          <li key={i}>{item}</li>
        ))}
      </ul>
      <button onClick={addItem}>Add</button>
    </div>
  );
}
"#;

#[test]
fn test_todo_list_model() {
    let model = parse(TODO_LIST).unwrap();

    assert_eq!(model.name, "TodoList");
    assert_eq!(
        model.imports,
        vec![
            "import { v4 as uuid } from 'uuid'".to_string(),
            "import './TodoList.css'".to_string(),
        ]
    );

    assert_eq!(
        model.inputs,
        vec![
            InputParam {
                name: "title".into(),
                type_text: "string".to_string(),
                default_value: None,
                optional: false,
            },
            InputParam {
                name: "initialItems".into(),
                type_text: "string[]".to_string(),
                default_value: Some("[]".to_string()),
                optional: true,
            },
            InputParam {
                name: "onChange".into(),
                type_text: "(items: string[]) => void".to_string(),
                default_value: None,
                optional: true,
            },
        ]
    );

    assert_eq!(model.state_slots.len(), 2);
    assert_eq!(model.state_slots[0].type_text.as_deref(), Some("string[]"));
    assert_eq!(model.state_slots[1].initial_value, "''");

    assert_eq!(model.effects.len(), 1);
    assert_eq!(model.effects[0].dependencies, vec!["items".to_string()]);

    let names: Vec<&str> = model.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["addItem", "sync"]);
    assert_eq!(
        model.function("addItem").unwrap().body,
        "    items = [...items, draft];\n    draft = '';"
    );
    assert!(model.function("sync").unwrap().is_async);

    assert!(model.markup_text.starts_with("<div className=\"todo\">"));
    assert!(model.markup_text.ends_with("</div>"));
}

#[test]
fn test_isolator_round_trip() {
    let isolated = isolate_markup(TODO_LIST).unwrap();
    assert!(!isolated.declarations.contains("<ul>"));
    assert_eq!(isolated.reconstruct(TODO_LIST), TODO_LIST);
}

#[test]
fn test_source_without_markup() {
    let source = "export const helper = () => {\n  return 1;\n};\n";
    let isolated = isolate_markup(source).unwrap();
    assert_eq!(isolated.declarations, source);
    assert_eq!(isolated.markup, "");
}

#[test]
fn test_unbalanced_reports_position() {
    let source = "function Broken() {\n  return (\n    <p>(oops</p>\n  );\n";
    let err = parse(source).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnbalancedDelimiter { depth: 1 });
    assert_eq!(err.line_col(source), (2, 3));
    assert!(err.to_string().contains("could not match markup parentheses"));
}

#[test]
fn test_arrow_component_with_body_props() {
    let source = r#"const Greeting = (props) => {
  const { name, greeting = "Hello" } = props;
  return (
    <p>{greeting}, {name}!</p>
  );
};"#;
    let model = parse(source).unwrap();
    assert_eq!(model.name, "Greeting");
    let names: Vec<&str> = model.inputs.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["name", "greeting"]);
    assert!(model.functions.is_empty());
    assert_eq!(model.markup_text, "<p>{greeting}, {name}!</p>");
}
