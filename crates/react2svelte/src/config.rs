//! Configuration loading.
//!
//! `react2svelte.json` is plain JSON with `//` and `/* */` comments allowed.
//! Every key is optional; absent keys keep the built-in defaults. Event and
//! attribute tables are merged over the defaults rather than replacing them.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::fs;
use svelte_emitter::TranspileOptions;
use thiserror::Error;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "react2svelte.json";

/// Configuration loading errors.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid configuration in {path}: {source}")]
    #[diagnostic(help("keys are camelCase, for example \"fragmentElement\""))]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings read from `react2svelte.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    pub default_component_name: Option<String>,
    pub props_type_suffix: Option<String>,
    pub excluded_import_sources: Option<Vec<String>>,
    pub default_type: Option<String>,
    pub events: IndexMap<String, String>,
    pub attributes: IndexMap<String, String>,
    pub fragment_element: Option<String>,
    pub key_attribute: Option<String>,
    pub script_lang: Option<String>,
    pub indent: Option<String>,
    pub section_comments: Option<bool>,
    pub emit_imports: Option<bool>,
    pub effect_dependency_comments: Option<bool>,
    /// Extra glob patterns skipped while walking directories.
    pub ignore: Vec<String>,
}

impl Config {
    /// Loads configuration from an explicit path.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads `react2svelte.json` from `dir` if it exists.
    pub fn find(dir: &Utf8Path) -> Result<Option<(Utf8PathBuf, Self)>, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(|config| Some((path, config)))
    }

    /// Parses configuration text.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(&strip_comments(content))
    }

    /// Builds transpile options from the defaults and this configuration.
    pub fn transpile_options(&self) -> TranspileOptions {
        let mut options = TranspileOptions::default();

        let extract = &mut options.extract;
        override_with(&mut extract.default_component_name, &self.default_component_name);
        override_with(&mut extract.props_type_suffix, &self.props_type_suffix);
        override_with(&mut extract.excluded_import_sources, &self.excluded_import_sources);
        override_with(&mut extract.default_type, &self.default_type);

        let markup = &mut options.markup;
        markup
            .events
            .extend(self.events.iter().map(|(k, v)| (k.clone(), v.clone())));
        markup
            .attributes
            .extend(self.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        override_with(&mut markup.fragment_element, &self.fragment_element);
        override_with(&mut markup.key_attribute, &self.key_attribute);

        let generate = &mut options.generate;
        override_with(&mut generate.script_lang, &self.script_lang);
        override_with(&mut generate.indent, &self.indent);
        override_with(&mut generate.section_comments, &self.section_comments);
        override_with(&mut generate.emit_imports, &self.emit_imports);
        override_with(
            &mut generate.effect_dependency_comments,
            &self.effect_dependency_comments,
        );

        options
    }
}

fn override_with<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Blanks out `//` and `/* */` comments outside of strings.
///
/// Comment bytes become spaces (newlines are kept) so serde_json error
/// positions still point into the original text.
fn strip_comments(json: &str) -> String {
    let bytes = json.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 1;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (b, bytes.get(i + 1)) {
            (b'"', _) => {
                in_string = true;
                out.push(b);
                i += 1;
            }
            (b'/', Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
            }
            (b'/', Some(b'*')) => {
                let end = json[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |rel| i + 2 + rel + 2);
                out.extend(
                    bytes[i..end]
                        .iter()
                        .map(|&c| if c == b'\n' { b'\n' } else { b' ' }),
                );
                i = end;
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // Comments are blanked byte for byte, so whole characters are replaced.
    String::from_utf8(out).unwrap_or_else(|_| json.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_comments() {
        let json = "{\n  // line\n  \"a\": \"x // not a comment\", /* block */ \"b\": 1\n}";
        let cleaned = strip_comments(json);
        assert_eq!(cleaned.len(), json.len());
        assert!(!cleaned.contains("// line"));
        assert!(!cleaned.contains("/*"));
        assert!(cleaned.contains("\"x // not a comment\""));
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.transpile_options(), TranspileOptions::default());
    }

    #[test]
    fn test_overrides_and_merged_tables() {
        let config = Config::parse(
            r#"{
                // prefer sections over divs
                "fragmentElement": "section",
                "sectionComments": false,
                "events": { "onDoubleClick": "ondblclick" },
                "excludedImportSources": ["react", "next", "@emotion"]
            }"#,
        )
        .unwrap();
        let options = config.transpile_options();

        assert_eq!(options.markup.fragment_element, "section");
        assert!(!options.generate.section_comments);
        assert_eq!(options.markup.events.len(), 10);
        assert_eq!(
            options.markup.events.get("onDoubleClick").map(String::as_str),
            Some("ondblclick")
        );
        assert_eq!(options.markup.events.get("onClick").map(String::as_str), Some("onclick"));
        assert_eq!(options.extract.excluded_import_sources.len(), 3);
        assert_eq!(options.generate.script_lang, "ts");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::parse(r#"{ "fragment": "section" }"#).is_err());
    }
}
