use serde::{Deserialize, Serialize};

/// A declarative validation rule that can be attached to a parameter.
///
/// These are pure data descriptions of constraints. Actual validation
/// logic lives in the engine or in `floe-validator` -- this crate only
/// defines the rule shapes so they can be serialized into parameter schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    /// String must be at least `length` characters.
    MinLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// String must be at most `length` characters.
    MaxLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// String must match the given regex pattern.
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be >= `value`.
    Min {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be <= `value`.
    Max {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must be one of the given allowed values.
    OneOf {
        values: Vec<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must satisfy a custom expression (evaluated by the engine).
    Custom {
        expression: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Collection must contain at least `count` items.
    MinItems {
        count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Collection must contain at most `count` items.
    MaxItems {
        count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    /// Require a minimum string length.
    #[must_use]
    pub fn min_length(length: usize) -> Self {
        Self::MinLength {
            length,
            message: None,
        }
    }

    /// Require a maximum string length.
    #[must_use]
    pub fn max_length(length: usize) -> Self {
        Self::MaxLength {
            length,
            message: None,
        }
    }

    /// Require a string to match a regex pattern.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: None,
        }
    }

    /// Require a numeric minimum (inclusive).
    #[must_use]
    pub fn min(value: f64) -> Self {
        Self::Min {
            value,
            message: None,
        }
    }

    /// Require a numeric maximum (inclusive).
    #[must_use]
    pub fn max(value: f64) -> Self {
        Self::Max {
            value,
            message: None,
        }
    }

    /// Require a numeric value within an inclusive range.
    ///
    /// Returns a pair of `[Min, Max]` rules.
    #[must_use]
    pub fn range(min: f64, max: f64) -> Vec<Self> {
        vec![Self::min(min), Self::max(max)]
    }

    /// Require a minimum number of items in a collection.
    #[must_use]
    pub fn min_items(count: usize) -> Self {
        Self::MinItems {
            count,
            message: None,
        }
    }

    /// Require a maximum number of items in a collection.
    #[must_use]
    pub fn max_items(count: usize) -> Self {
        Self::MaxItems {
            count,
            message: None,
        }
    }

    /// Set a custom error message on this rule (builder-style).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        match &mut self {
            Self::MinLength { message: m, .. }
            | Self::MaxLength { message: m, .. }
            | Self::Pattern { message: m, .. }
            | Self::Min { message: m, .. }
            | Self::Max { message: m, .. }
            | Self::OneOf { message: m, .. }
            | Self::Custom { message: m, .. }
            | Self::MinItems { message: m, .. }
            | Self::MaxItems { message: m, .. } => {
                *m = Some(message.into());
            }
        }
        self
    }
}
