//! Concrete string validators.

use crate::core::{Validate, ValidationComplexity, ValidationError, ValidatorMetadata};

/// Requires a string to have at least `min` characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    min: usize,
}

impl Validate for MinLength {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.chars().count() >= self.min {
            Ok(())
        } else {
            Err(ValidationError::min_length("", self.min, input.chars().count()))
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf(
            format!("MinLength({})", self.min),
            ValidationComplexity::Linear,
        )
    }
}

/// Requires a string to have at most `max` characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    max: usize,
}

impl Validate for MaxLength {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.chars().count() <= self.max {
            Ok(())
        } else {
            Err(ValidationError::max_length("", self.max, input.chars().count()))
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf(
            format!("MaxLength({})", self.max),
            ValidationComplexity::Linear,
        )
    }
}

/// Requires a string to have exactly `len` characters.
#[derive(Debug, Clone, Copy)]
pub struct ExactLength {
    len: usize,
}

impl Validate for ExactLength {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let actual = input.chars().count();
        if actual == self.len {
            Ok(())
        } else {
            Err(ValidationError::new(
                "exact_length",
                format!("expected length {}, got {actual}", self.len),
            ))
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf(
            format!("ExactLength({})", self.len),
            ValidationComplexity::Linear,
        )
    }
}

/// Requires a string to contain a literal substring.
#[derive(Debug, Clone)]
pub struct Contains {
    needle: String,
}

impl Validate for Contains {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.contains(&self.needle) {
            Ok(())
        } else {
            Err(ValidationError::new(
                "contains",
                format!("expected substring `{}`", self.needle),
            ))
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf(
            format!("Contains({})", self.needle),
            ValidationComplexity::Linear,
        )
    }
}

/// Requires a string to match a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: regex::Regex,
}

impl Validate for Pattern {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if self.regex.is_match(input) {
            Ok(())
        } else {
            Err(ValidationError::new(
                "pattern",
                format!("does not match pattern `{}`", self.regex.as_str()),
            ))
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf(
            format!("Pattern({})", self.regex.as_str()),
            ValidationComplexity::Linear,
        )
    }
}

/// Requires a string to contain at least `min` characters.
#[must_use]
pub fn min_length(min: usize) -> MinLength {
    MinLength { min }
}

/// Requires a string to contain at most `max` characters.
#[must_use]
pub fn max_length(max: usize) -> MaxLength {
    MaxLength { max }
}

/// Requires a string to have exactly `len` characters.
#[must_use]
pub fn exact_length(len: usize) -> ExactLength {
    ExactLength { len }
}

/// Requires a string to contain `needle` as a substring.
pub fn contains(needle: impl Into<String>) -> Contains {
    Contains { needle: needle.into() }
}

/// Requires a string to match a compiled regular expression.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regex. Use at startup with a literal
/// pattern known to compile; for user-supplied patterns, compile the
/// `regex::Regex` yourself and construct `Pattern` via `From`.
#[must_use]
pub fn pattern(pattern: &str) -> Pattern {
    Pattern {
        regex: regex::Regex::new(pattern).expect("invalid regex pattern"),
    }
}

/// A loose but practical email-address shape check (not RFC 5322-complete).
#[must_use]
pub fn email() -> Pattern {
    Pattern {
        regex: regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern is valid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_length_rejects_short_strings() {
        assert!(min_length(3).validate("ab").is_err());
        assert!(min_length(3).validate("abc").is_ok());
    }

    #[test]
    fn max_length_rejects_long_strings() {
        assert!(max_length(3).validate("abcd").is_err());
        assert!(max_length(3).validate("abc").is_ok());
    }

    #[test]
    fn email_accepts_simple_addresses() {
        assert!(email().validate("a@b.com").is_ok());
        assert!(email().validate("not-an-email").is_err());
    }

    #[test]
    fn pattern_matches_regex() {
        let v = pattern(r"^\d{3}-\d{4}$");
        assert!(v.validate("555-1234").is_ok());
        assert!(v.validate("not-a-number").is_err());
    }
}
