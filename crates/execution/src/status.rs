//! Execution-level status tracking.

use serde::{Deserialize, Serialize};

/// The overall status of a workflow execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Created but not yet started.
    Created,
    /// Actively running nodes.
    Running,
    /// Temporarily paused by the user or system.
    Paused,
    /// Suspended awaiting a HIL resume token or a `FLOW.WAIT`/`DELAY` timer
    /// (spec §4.4); distinct from `Paused`, which is operator-initiated.
    Waiting,
    /// Cancellation has been requested; waiting for active nodes to drain.
    Cancelling,
    /// All nodes completed successfully.
    Completed,
    /// At least one node failed and the execution could not continue.
    Failed,
    /// Cancelled after a cancellation request was fully processed.
    Cancelled,
    /// The execution exceeded its wall-clock time budget.
    TimedOut,
}

impl ExecutionStatus {
    /// Returns `true` if the execution has reached a final state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::TimedOut
        )
    }

    /// Returns `true` if the execution is currently doing work.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Cancelling | Self::Waiting)
    }

    /// Returns `true` if the execution completed successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` if the execution ended in a failure state.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::TimedOut)
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Waiting => write!(f, "waiting"),
            Self::Cancelling => write!(f, "cancelling"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}
