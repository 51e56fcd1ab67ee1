//! Core validation vocabulary: the [`Validate`] trait, its error type, and
//! the metadata validators expose for diagnostics and UIs.

pub mod traits;

use std::borrow::Cow;

pub use traits::ValidateExt;

/// A single validation failure.
///
/// Cheap to clone (all fields are either `Cow<'static, str>` or small
/// copies) so it can be cached by combinators like [`crate::combinators::Cached`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ValidationError {
    /// Machine-readable error code (`"min_length"`, `"type_mismatch"`, ...).
    pub code: Cow<'static, str>,
    /// Human-readable description.
    pub message: Cow<'static, str>,
    /// Optional JSON-pointer-style path to the field that failed, when the
    /// validator operates on a structured document.
    pub field: Option<Cow<'static, str>>,
}

impl ValidationError {
    /// Build a validation error from an explicit code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Attach a field path to an existing error.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Error for a string shorter than `min`.
    pub fn min_length(field: impl Into<Cow<'static, str>>, min: usize, actual: usize) -> Self {
        Self::new(
            "min_length",
            format!("expected at least {min} characters, got {actual}"),
        )
        .with_field(field)
    }

    /// Error for a string longer than `max`.
    pub fn max_length(field: impl Into<Cow<'static, str>>, max: usize, actual: usize) -> Self {
        Self::new(
            "max_length",
            format!("expected at most {max} characters, got {actual}"),
        )
        .with_field(field)
    }

    /// Error for a numeric value below `min`.
    pub fn below_min(field: impl Into<Cow<'static, str>>, min: f64, actual: f64) -> Self {
        Self::new("min_value", format!("expected >= {min}, got {actual}")).with_field(field)
    }

    /// Error for a numeric value above `max`.
    pub fn above_max(field: impl Into<Cow<'static, str>>, max: f64, actual: f64) -> Self {
        Self::new("max_value", format!("expected <= {max}, got {actual}")).with_field(field)
    }

    /// Error for a value whose runtime type doesn't match what the
    /// validator expects (e.g. a number where a string validator ran).
    pub fn type_mismatch(expected: &str) -> Self {
        Self::new("type_mismatch", format!("expected a {expected} value"))
    }
}

impl floe_error::Classify for ValidationError {
    fn kind(&self) -> floe_error::ErrorKind {
        floe_error::ErrorKind::InvalidInput
    }
}

/// Relative cost of running a validator, used by combinators to order
/// cheap checks before expensive ones and to decide whether caching is
/// worthwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationComplexity {
    /// O(1): field presence, simple comparisons.
    Constant,
    /// O(n) in the input size: length checks, regex matches.
    Linear,
    /// Anything costlier (network calls, nested document walks).
    Expensive,
}

/// Descriptive metadata a validator can report about itself.
#[derive(Debug, Clone)]
pub struct ValidatorMetadata {
    /// Short validator name, used in combinator display strings.
    pub name: Cow<'static, str>,
    /// Longer human-readable description.
    pub description: Option<Cow<'static, str>>,
    /// Relative execution cost.
    pub complexity: ValidationComplexity,
    /// Whether the validator is a pure function of its input (safe to cache).
    pub cacheable: bool,
    /// Optional measured or estimated execution time.
    pub estimated_time: Option<std::time::Duration>,
    /// Free-form tags (`"combinator"`, `"cached"`, ...) for introspection.
    pub tags: Vec<Cow<'static, str>>,
    /// Validator implementation version, if versioned.
    pub version: Option<Cow<'static, str>>,
    /// Extra key-value metadata for application-specific use.
    pub custom: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidatorMetadata {
    /// Metadata for a leaf validator with no further composition.
    pub fn leaf(name: impl Into<Cow<'static, str>>, complexity: ValidationComplexity) -> Self {
        Self {
            name: name.into(),
            description: None,
            complexity,
            cacheable: true,
            estimated_time: None,
            tags: Vec::new(),
            version: None,
            custom: Vec::new(),
        }
    }
}

/// A validator over a specific input type.
///
/// Implementors check a single concern (length, pattern, range); combine
/// them with [`ValidateExt::and`]/[`ValidateExt::or`]/[`crate::combinators::not`]
/// to build richer rules.
pub trait Validate {
    /// The input type this validator inspects.
    type Input: ?Sized;

    /// Run the check, returning the first failure if any.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Self-describing metadata, used for diagnostics and docs generation.
    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("validator", ValidationComplexity::Constant)
    }
}
