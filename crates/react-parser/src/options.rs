//! Extraction settings.

/// Tunables for the structural extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Name used when no component declaration is recognized.
    pub default_component_name: String,
    /// Suffix identifying the props interface or type alias (`ButtonProps`).
    pub props_type_suffix: String,
    /// Imports whose specifier contains any of these are dropped.
    pub excluded_import_sources: Vec<String>,
    /// Type text for props without a recovered type.
    pub default_type: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_component_name: "Component".to_string(),
            props_type_suffix: "Props".to_string(),
            excluded_import_sources: vec!["react".to_string(), "next".to_string()],
            default_type: "any".to_string(),
        }
    }
}
