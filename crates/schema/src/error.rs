//! Structured errors produced while validating a configuration against a
//! [`crate::schema::NodeSchema`].

use floe_error::{Classify, ErrorKind};
use thiserror::Error;

/// One configuration-validation failure, tagged with the failing key.
///
/// The `code()` values correspond to the Spec Registry's documented failure
/// kinds: `CONFIG_MISSING`, `CONFIG_TYPE`, `ENUM_NOT_ALLOWED`,
/// `NUMERIC_OUT_OF_RANGE`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("unknown configuration key `{key}`")]
    UnknownKey { key: String },

    #[error("missing required configuration key `{key}`")]
    ConfigMissing { key: String },

    #[error("configuration key `{key}` expected type `{expected}`, got `{actual}`")]
    ConfigType {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("configuration key `{key}` value `{value}` is not one of the allowed options")]
    EnumNotAllowed { key: String, value: String },

    #[error("configuration key `{key}` value {value} is outside [{min:?}, {max:?}]")]
    NumericOutOfRange {
        key: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl SchemaError {
    /// Machine-readable error code matching the registry's documented kinds.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownKey { .. } => "UNKNOWN_KEY",
            Self::ConfigMissing { .. } => "CONFIG_MISSING",
            Self::ConfigType { .. } => "CONFIG_TYPE",
            Self::EnumNotAllowed { .. } => "ENUM_NOT_ALLOWED",
            Self::NumericOutOfRange { .. } => "NUMERIC_OUT_OF_RANGE",
        }
    }
}

impl Classify for SchemaError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}
