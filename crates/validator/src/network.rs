//! Network-shaped validators: `Ipv4`, `Ipv6`, `Hostname`, `IpAddr`.
//!
//! Gated behind the `network` feature (enabled by default).

use crate::core::{Validate, ValidationComplexity, ValidationError, ValidatorMetadata};
use std::net::IpAddr as StdIpAddr;

/// Requires a string to parse as an IPv4 address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4;

impl Validate for Ipv4 {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        input
            .parse::<std::net::Ipv4Addr>()
            .map(|_| ())
            .map_err(|_| ValidationError::new("ipv4", "not a valid IPv4 address"))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("Ipv4", ValidationComplexity::Linear)
    }
}

/// Requires a string to parse as an IPv6 address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv6;

impl Validate for Ipv6 {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        input
            .parse::<std::net::Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| ValidationError::new("ipv6", "not a valid IPv6 address"))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("Ipv6", ValidationComplexity::Linear)
    }
}

/// Requires a string to parse as either an IPv4 or IPv6 address.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpAddr;

impl Validate for IpAddr {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        input
            .parse::<StdIpAddr>()
            .map(|_| ())
            .map_err(|_| ValidationError::new("ip_addr", "not a valid IP address"))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("IpAddr", ValidationComplexity::Linear)
    }
}

/// Requires a string to be a syntactically valid DNS hostname (RFC 1123):
/// 1-253 characters, dot-separated labels of 1-63 alphanumerics or hyphens,
/// no leading/trailing hyphen per label.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hostname;

impl Validate for Hostname {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let err = || ValidationError::new("hostname", "not a valid hostname");
        if input.is_empty() || input.len() > 253 {
            return Err(err());
        }
        for label in input.split('.') {
            let valid_label = !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
            if !valid_label {
                return Err(err());
            }
        }
        Ok(())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf("Hostname", ValidationComplexity::Linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_accepts_dotted_quad() {
        assert!(Ipv4.validate("127.0.0.1").is_ok());
        assert!(Ipv4.validate("::1").is_err());
    }

    #[test]
    fn ipv6_accepts_colon_form() {
        assert!(Ipv6.validate("::1").is_ok());
        assert!(Ipv6.validate("127.0.0.1").is_err());
    }

    #[test]
    fn ip_addr_accepts_either_family() {
        assert!(IpAddr.validate("127.0.0.1").is_ok());
        assert!(IpAddr.validate("::1").is_ok());
        assert!(IpAddr.validate("not-an-ip").is_err());
    }

    #[test]
    fn hostname_rejects_bad_labels() {
        assert!(Hostname.validate("example.com").is_ok());
        assert!(Hostname.validate("-bad.com").is_err());
        assert!(Hostname.validate("").is_err());
    }
}
