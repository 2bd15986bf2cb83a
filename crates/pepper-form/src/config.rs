//! Form Configuration

use serde::Deserialize;

/// Class names and keys the renderer looks for in templates
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Class token of the container wrapping one field and its error slot
    pub field_class: String,

    /// Class token of the error-message slot
    pub error_class: String,

    /// Data key and hidden input carrying the schema name
    pub schema_field: String,
}

impl FormConfig {
    /// Load from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            field_class: "field".to_string(),
            error_class: "error-message".to_string(),
            schema_field: "schema".to_string(),
        }
    }
}
