use serde::{Deserialize, Serialize};

use crate::def::ParameterDef;
use crate::display::ParameterDisplay;
use crate::metadata::ParameterMetadata;
use crate::validation::ValidationRule;

/// Options specific to object parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectOptions {
    /// Whether the object can be collapsed in the UI.
    #[serde(default)]
    pub collapsible: bool,

    /// Whether the object starts collapsed.
    #[serde(default)]
    pub collapsed_by_default: bool,
}

/// A fixed set of named child parameters grouped as an object.
///
/// Use case: DB connection (host + port + user + password grouped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectParameter {
    #[serde(flatten)]
    pub metadata: ParameterMetadata,

    /// The child parameters that make up this object.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ParameterDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ObjectOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<ParameterDisplay>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
}

impl ObjectParameter {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ParameterMetadata::new(key, name),
            fields: Vec::new(),
            default: None,
            options: None,
            display: None,
            validation: Vec::new(),
        }
    }

    /// Add a child field (builder-style).
    #[must_use]
    pub fn with_field(mut self, field: ParameterDef) -> Self {
        self.fields.push(field);
        self
    }
}
