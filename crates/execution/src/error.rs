//! Execution error types.

use floe_core::NodeId;
use thiserror::Error;

use crate::status::ExecutionStatus;

/// Errors that can occur during workflow execution.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// A state transition is not valid for the current status.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Attempted target status.
        to: String,
    },

    /// A referenced node does not exist in the execution state.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// The execution plan failed validation.
    #[error("plan validation: {0}")]
    PlanValidation(String),

    /// A budget limit was exceeded.
    #[error("budget exceeded: {0}")]
    BudgetExceeded(String),

    /// An idempotency key has already been used.
    #[error("duplicate idempotency key: {0}")]
    DuplicateIdempotencyKey(String),

    /// A serialization or deserialization error.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The execution was cancelled.
    #[error("execution cancelled")]
    Cancelled,
}

impl ExecutionError {
    /// Create an invalid-transition error from execution statuses.
    pub fn invalid_execution_transition(from: ExecutionStatus, to: ExecutionStatus) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
