//! Engine-level error kinds: scheduling, conversion, and resume failures
//! that originate in the engine itself rather than in a dispatched node.

use floe_core::NodeId;
use floe_error::{Classify, ErrorKind};
use thiserror::Error;
use uuid::Uuid;

/// Failures raised by the scheduler loop, conversion runtime, or resume
/// layer -- as opposed to [`floe_action::ActionError`], which a dispatched
/// node itself returns.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No node is ready and at least one remains non-terminal: the
    /// workflow's edge/merge configuration can never satisfy every node's
    /// readiness condition.
    #[error("scheduler deadlock: no ready nodes but {pending} non-terminal node(s) remain")]
    SchedulerDeadlock {
        /// Number of non-terminal nodes left when the deadlock was detected.
        pending: usize,
    },

    /// `settings.timeout_seconds` elapsed before the execution finished.
    #[error("workflow timed out after {elapsed_seconds}s")]
    TimeoutWorkflow {
        /// Wall-clock seconds elapsed when the timeout fired.
        elapsed_seconds: u64,
    },

    /// A single node's `timeout_seconds` configuration elapsed.
    #[error("node `{node}` timed out after {elapsed_seconds}s")]
    TimeoutNode {
        /// The node that timed out.
        node: NodeId,
        /// Wall-clock seconds elapsed when the timeout fired.
        elapsed_seconds: u64,
    },

    /// A HIL node's `timeout_minutes` elapsed with no resume delivery and no
    /// `timeout` edge declared to route the synthetic classification.
    #[error("HIL node `{node}` timed out waiting for a human response")]
    HilTimeout {
        /// The HIL node that timed out.
        node: NodeId,
    },

    /// A connection's conversion function failed to evaluate.
    #[error("conversion on connection `{connection}` failed: {message}")]
    ConversionError {
        /// The connection whose conversion function failed.
        connection: Uuid,
        /// Truncated description of the failure.
        message: String,
    },

    /// `DeliverResume` was called with a token that does not exist or has
    /// already been consumed/expired.
    #[error("resume token `{token}` is stale: execution has moved past the waiting node")]
    ResumeStale {
        /// The token presented to `DeliverResume`.
        token: Uuid,
    },

    /// `DeliverResume` could not acquire the execution's lease in time.
    #[error("execution `{execution}` is busy: could not acquire its lease to resume")]
    ResumeBusy {
        /// The execution the caller tried to resume.
        execution: Uuid,
    },

    /// A ready node had no registered spec, dispatcher, or both.
    #[error("node `{node}` has no dispatcher registered for type `{category}`/`{subtype}`")]
    NoDispatcher {
        /// The undispatchable node.
        node: NodeId,
        /// Its declared category.
        subtype: String,
        /// Its declared subtype.
        category: String,
    },

    /// A node's configured `error_policy` stopped the execution.
    #[error("node `{node}` failed: {error}")]
    NodeFailed {
        /// The node that failed.
        node: NodeId,
        /// The action error that caused the failure.
        error: String,
    },

    /// Underlying execution-state-tracking failure (invalid transition,
    /// budget exceeded, ...).
    #[error(transparent)]
    Execution(#[from] floe_execution::ExecutionError),

    /// Underlying persistence/lease failure.
    #[error(transparent)]
    Ports(#[from] floe_ports::PortsError),
}

impl EngineError {
    /// Registry-documented failure-kind code (spec §7).
    #[must_use]
    pub fn kind_code(&self) -> &'static str {
        match self {
            Self::SchedulerDeadlock { .. } => "SCHEDULER_DEADLOCK",
            Self::TimeoutWorkflow { .. } => "TIMEOUT_WORKFLOW",
            Self::TimeoutNode { .. } => "TIMEOUT_NODE",
            Self::HilTimeout { .. } => "HIL_TIMEOUT",
            Self::ConversionError { .. } => "CONVERSION_ERROR",
            Self::ResumeStale { .. } => "RESUME_STALE",
            Self::ResumeBusy { .. } => "RESUME_BUSY",
            Self::NoDispatcher { .. } => "UNKNOWN_SUBTYPE",
            Self::NodeFailed { .. } => "NODE_FAILED",
            Self::Execution(_) => "EXECUTION_STATE_ERROR",
            Self::Ports(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl Classify for EngineError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::ResumeBusy { .. } => ErrorKind::Unavailable,
            Self::ResumeStale { .. } | Self::NoDispatcher { .. } => ErrorKind::InvalidInput,
            Self::NodeFailed { .. } => ErrorKind::InvalidInput,
            Self::TimeoutWorkflow { .. } | Self::TimeoutNode { .. } | Self::HilTimeout { .. } => {
                ErrorKind::ResourceExhausted
            }
            Self::SchedulerDeadlock { .. } | Self::ConversionError { .. } | Self::Execution(_) => {
                ErrorKind::Internal
            }
            Self::Ports(_) => ErrorKind::Internal,
        }
    }
}
