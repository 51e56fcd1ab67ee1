//! Field-type vocabulary shared by node configuration and input/output
//! schemas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The primitive type a configuration or input/output field holds.
///
/// Mirrors the node specification's `Configurations`/`input schema`/
/// `output schema` type set: string/int/float/bool/enum/json/url/email/
/// cron/file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    Enum,
    Json,
    Url,
    Email,
    Cron,
    File,
}

impl FieldType {
    /// Whether a JSON value's runtime shape is compatible with this type.
    ///
    /// `Json` accepts anything; the string-shaped variants (`Url`, `Email`,
    /// `Cron`, `File`, `Enum`) only check that the value is a JSON string --
    /// format-specific checking (URL syntax, cron syntax, allowed enum
    /// members, ...) happens in [`crate::schema::validate_config`].
    #[must_use]
    pub fn accepts(self, value: &serde_json::Value) -> bool {
        use serde_json::Value;
        match self {
            Self::String | Self::Url | Self::Email | Self::Cron | Self::File | Self::Enum => {
                value.is_string()
            }
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::Json => !matches!(value, Value::Null),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Enum => "enum",
            Self::Json => "json",
            Self::Url => "url",
            Self::Email => "email",
            Self::Cron => "cron",
            Self::File => "file",
        };
        f.write_str(s)
    }
}

/// A single entry in a node's `configurations` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ConfigField {
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
    /// Allowed values, meaningful only when `field_type == Enum`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Redact this field's value in logs, history and the editor UI.
    #[serde(default)]
    pub sensitive: bool,
    /// Hint that the editor should render a multi-line text area.
    #[serde(default)]
    pub multiline: bool,
}

impl ConfigField {
    /// A required field with no default, options, or bounds.
    #[must_use]
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            default: None,
            required: true,
            options: Vec::new(),
            min: None,
            max: None,
            sensitive: false,
            multiline: false,
        }
    }

    /// An optional field with a default value.
    #[must_use]
    pub fn optional(field_type: FieldType, default: serde_json::Value) -> Self {
        Self {
            field_type,
            default: Some(default),
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            sensitive: false,
            multiline: false,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}

/// A single entry in a node's input or output schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct IoField {
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

impl IoField {
    #[must_use]
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            default: None,
            required: false,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
