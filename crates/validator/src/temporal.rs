//! Date/time-shaped validators: `Date`, `Time`, `DateTime`, `Uuid`.
//!
//! Gated behind the `temporal` feature (enabled by default).

use crate::core::{Validate, ValidationComplexity, ValidationError, ValidatorMetadata};
use chrono::{NaiveDate, NaiveTime};

/// Requires a string to parse as an ISO-8601 calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

impl Validate for Date {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| ValidationError::new("date", "not a valid ISO-8601 date (YYYY-MM-DD)"))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("Date", ValidationComplexity::Linear)
    }
}

/// Requires a string to parse as an ISO-8601 time-of-day (`HH:MM:SS`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Time;

impl Validate for Time {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        NaiveTime::parse_from_str(input, "%H:%M:%S")
            .map(|_| ())
            .map_err(|_| ValidationError::new("time", "not a valid ISO-8601 time (HH:MM:SS)"))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("Time", ValidationComplexity::Linear)
    }
}

/// Requires a string to parse as an RFC 3339 timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTime;

impl Validate for DateTime {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        chrono::DateTime::parse_from_rfc3339(input)
            .map(|_| ())
            .map_err(|_| ValidationError::new("date_time", "not a valid RFC 3339 timestamp"))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("DateTime", ValidationComplexity::Linear)
    }
}

/// Requires a string to parse as a UUID (any version).
#[derive(Debug, Clone, Copy, Default)]
pub struct Uuid;

impl Validate for Uuid {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        input
            .parse::<uuid::Uuid>()
            .map(|_| ())
            .map_err(|_| ValidationError::new("uuid", "not a valid UUID"))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("Uuid", ValidationComplexity::Linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_iso8601() {
        assert!(Date.validate("2026-07-27").is_ok());
        assert!(Date.validate("07/27/2026").is_err());
    }

    #[test]
    fn time_accepts_hms() {
        assert!(Time.validate("13:45:00").is_ok());
        assert!(Time.validate("1pm").is_err());
    }

    #[test]
    fn date_time_accepts_rfc3339() {
        assert!(DateTime.validate("2026-07-27T13:45:00Z").is_ok());
        assert!(DateTime.validate("2026-07-27 13:45:00").is_err());
    }

    #[test]
    fn uuid_accepts_hyphenated_form() {
        assert!(Uuid.validate("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(Uuid.validate("not-a-uuid").is_err());
    }
}
