//! Error types for port operations.
//!
//! Every port method returns `Result<_, PortsError>`. Backend drivers map
//! their internal errors into these variants so the engine can make
//! retry/fallback decisions without knowing the concrete backend.

use std::time::Duration;

/// Error type for all port operations.
///
/// Distinguishes retryable failures (connection, timeout) from permanent
/// ones (not found, conflict, serialization) so the engine can apply
/// retry policies without inspecting error messages.
#[derive(Debug, thiserror::Error)]
pub enum PortsError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity (e.g. "Workflow", "Execution").
        entity: String,
        /// Identifier that was looked up.
        id: String,
    },

    /// Optimistic concurrency conflict.
    #[error("{entity} {id}: expected version {expected_version}, got {actual_version}")]
    Conflict {
        /// Kind of entity.
        entity: String,
        /// Identifier of the conflicting entity.
        id: String,
        /// Version the caller expected.
        expected_version: u64,
        /// Version currently stored.
        actual_version: u64,
    },

    /// Backend connection failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Operation exceeded its timeout.
    #[error("timeout: {operation} after {duration:?}")]
    Timeout {
        /// Name of the operation that timed out.
        operation: String,
        /// How long was waited before giving up.
        duration: Duration,
    },

    /// Execution lease is held by another worker.
    #[error("lease unavailable for execution {execution_id}")]
    LeaseUnavailable {
        /// The execution whose lease could not be acquired.
        execution_id: String,
    },

    /// Catch-all internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PortsError {
    /// Convenience constructor for [`PortsError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Convenience constructor for [`PortsError::Conflict`].
    pub fn conflict(
        entity: impl Into<String>,
        id: impl Into<String>,
        expected: u64,
        actual: u64,
    ) -> Self {
        Self::Conflict {
            entity: entity.into(),
            id: id.into(),
            expected_version: expected,
            actual_version: actual,
        }
    }

    /// Convenience constructor for [`PortsError::Timeout`].
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Returns `true` for transient errors that the engine may retry.
    ///
    /// Currently [`Connection`](Self::Connection) and [`Timeout`](Self::Timeout).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for PortsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
