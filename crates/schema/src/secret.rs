//! [`SecretString`]: a wrapper for configuration values marked
//! `ConfigField::sensitive`, zeroized on drop and redacted in `Debug`.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// A string that is never printed by `Debug` and is zeroized when dropped.
///
/// Used for the runtime value of a `sensitive` [`crate::field::ConfigField`]
/// (API keys, tokens) once it has been resolved from credential storage into
/// a node's configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Read the underlying value.
    ///
    /// With the `audit-secret-expose` feature enabled, every call emits a
    /// `tracing::debug!` event carrying the caller's location.
    #[must_use]
    #[track_caller]
    pub fn expose(&self) -> &str {
        #[cfg(feature = "audit-secret-expose")]
        {
            let location = std::panic::Location::caller();
            tracing::debug!(file = location.file(), line = location.line(), "secret exposed");
        }
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(\"[redacted]\")")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for SecretString {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_leaks_value() {
        let secret = SecretString::new("super-secret-token");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("super-secret-token"));
    }

    #[test]
    fn expose_returns_original_value() {
        let secret = SecretString::new("super-secret-token");
        assert_eq!(secret.expose(), "super-secret-token");
    }

    #[test]
    fn equality_is_value_based() {
        assert_eq!(SecretString::new("a"), SecretString::new("a"));
        assert_ne!(SecretString::new("a"), SecretString::new("b"));
    }
}
