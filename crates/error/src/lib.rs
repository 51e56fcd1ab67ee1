//! Shared error infrastructure for the Floe workflow engine.
//!
//! Every crate in the workspace defines its own `thiserror`-derived error
//! enum for its domain (`ActionError`, `CredentialError`, `WorkflowError`, ...).
//! This crate supplies the small set of cross-cutting pieces those enums
//! build on: a retry/terminal classification trait, an error-kind tag used
//! for structured logging and API responses, and a boxed "any domain error"
//! wrapper for call sites that bridge multiple crates (e.g. the scheduler).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse classification of an error's retry semantics.
///
/// The scheduler (`floe-engine`) consults this to decide whether a failed
/// node execution is eligible for a retry attempt or must be reported as a
/// terminal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// Transient failure; retrying with backoff may succeed.
    Retryable,
    /// Permanent failure; retrying would not change the outcome.
    Terminal,
    /// Caller supplied invalid input; fix the request and retry.
    InvalidInput,
    /// Referenced entity does not exist.
    NotFound,
    /// Entity already exists / conflicting state.
    Conflict,
    /// Caller is not permitted to perform the operation.
    Unauthorized,
    /// Dependency (persistence, provider, external service) is unavailable.
    Unavailable,
    /// Operation exceeded its allotted time or resource budget.
    ResourceExhausted,
    /// Internal invariant violation; indicates a bug rather than bad input.
    Internal,
}

impl ErrorKind {
    /// Whether an operation that failed with this kind is worth retrying.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Retryable | Self::Unavailable)
    }

    /// Whether this kind represents a terminal, non-retryable failure.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_retryable()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Retryable => "retryable",
            Self::Terminal => "terminal",
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Unavailable => "unavailable",
            Self::ResourceExhausted => "resource_exhausted",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Implemented by every domain error enum so cross-crate call sites (the
/// scheduler, the HIL layer, API handlers) can classify a failure without
/// matching on the concrete error type.
pub trait Classify {
    /// The coarse classification of this error value.
    fn kind(&self) -> ErrorKind;

    /// Convenience accessor mirroring [`ErrorKind::is_retryable`].
    fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Convenience accessor mirroring [`ErrorKind::is_terminal`].
    fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }
}

/// Type-erased wrapper for a classified domain error.
///
/// Used where a caller needs to propagate an error across a domain
/// boundary (e.g. `floe-action` errors surfacing through `floe-engine`)
/// without the upstream crate depending on the downstream crate's error
/// enum.
#[derive(Debug)]
pub struct BoxError {
    kind: ErrorKind,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl BoxError {
    /// Wrap a classified error, recording its kind for later inspection.
    pub fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            source: Box::new(source),
        }
    }

    /// The classification recorded at construction time.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for BoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.source)
    }
}

impl std::error::Error for BoxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl Classify for BoxError {
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}
