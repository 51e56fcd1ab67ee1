//! Per-workflow execution settings.

use serde::{Deserialize, Serialize};

/// How the scheduler reacts when a node's execution ends in `ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorPolicy {
    /// Halt the execution; mark it `ERROR`.
    StopOnError,
    /// Continue downstream edges with the node's regular (empty) output.
    ContinueRegularOutput,
    /// Continue downstream edges via the node's dedicated error output.
    ContinueErrorOutput,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::StopOnError
    }
}

/// Workflow-level settings applied by the scheduler for every execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSettings {
    /// Wall-clock budget for the whole execution. `None` means no timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    /// IANA timezone name used to resolve cron triggers and `FLOW.DELAY`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub error_policy: ErrorPolicy,
    /// Whether `NodeExecution` records are persisted as the execution
    /// progresses, rather than only at terminal state.
    #[serde(default = "default_true")]
    pub save_execution_progress: bool,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            timezone: default_timezone(),
            error_policy: ErrorPolicy::default(),
            save_execution_progress: true,
        }
    }
}
