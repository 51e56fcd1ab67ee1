//! Per-node runtime state tracking.

use serde::{Deserialize, Serialize};

/// The execution state of a single node within a running workflow.
///
/// `WaitingHuman` is entered only by a `HUMAN_IN_THE_LOOP` node issuing a
/// resume token (spec §4.5); it is the node-level counterpart of
/// [`ExecutionStatus::Waiting`](crate::status::ExecutionStatus::Waiting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// Not yet scheduled; waiting on predecessors or readiness.
    Pending,
    /// Ready to dispatch — on the scheduler's ready frontier.
    Ready,
    /// Currently executing.
    Running,
    /// Suspended awaiting a HIL resume token or timer.
    WaitingHuman,
    /// Failed but eligible for another attempt.
    Retrying,
    /// Completed successfully.
    Completed,
    /// Failed with no further attempts.
    Failed,
    /// Skipped — an upstream branch was not taken, or a predecessor errored
    /// under `CONTINUE_ERROR_OUTPUT`.
    Skipped,
    /// Cancelled as part of an execution-wide cancellation.
    Cancelled,
}

impl NodeState {
    /// Returns `true` if this is a terminal state (no further transitions).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Skipped | Self::Cancelled
        )
    }

    /// Returns `true` if the node is currently occupying a worker or is
    /// otherwise not idle.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Retrying | Self::WaitingHuman)
    }
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Ready => write!(f, "ready"),
            Self::Running => write!(f, "running"),
            Self::WaitingHuman => write!(f, "waiting_human"),
            Self::Retrying => write!(f, "retrying"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}
