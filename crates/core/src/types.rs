//! Small value types shared across the workspace: semantic versions,
//! lifecycle status/priority enums, and the generic operation
//! result/context pair used by long-running infrastructure operations
//! (not workflow node execution, which has its own richer state machine in
//! `floe-execution`).

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ExecutionId, NodeId, TenantId, UserId, WorkflowId};

/// A node type's interface version: the `(major, minor)` pair a node
/// registry entry advertises so callers can detect breaking changes in a
/// node's configuration/IO shape. Two versions are interface-compatible
/// iff their major components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InterfaceVersion {
    pub major: u32,
    pub minor: u32,
}

impl InterfaceVersion {
    #[must_use]
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    #[must_use]
    pub fn is_compatible_with(&self, other: &InterfaceVersion) -> bool {
        self.major == other.major
    }
}

impl Default for InterfaceVersion {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for InterfaceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A semantic version, with optional pre-release and build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
    pub build: Option<String>,
}

impl Version {
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
            build: None,
        }
    }

    #[must_use]
    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = Some(pre.into());
        self
    }

    #[must_use]
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.pre.is_none()
    }

    #[must_use]
    pub fn is_compatible_with(&self, other: &Version) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

/// A generic lifecycle status, used by infrastructure operations that
/// don't warrant their own bespoke state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Inactive,
    InProgress,
    Completed,
    Failed,
    Pending,
    Cancelled,
    Suspended,
    Error,
}

impl Status {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Active | Self::Completed)
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Error
        )
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active | Self::InProgress)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
            Self::Suspended => "suspended",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Operation priority, used by queues and schedulers that need a generic
/// priority axis beyond a workflow's own scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low = 1,
    #[default]
    Normal = 2,
    High = 3,
    Critical = 4,
    Emergency = 5,
}

impl Priority {
    #[must_use]
    pub fn value(&self) -> u8 {
        *self as u8
    }

    #[must_use]
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::High | Self::Critical | Self::Emergency)
    }

    #[must_use]
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical | Self::Emergency)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Emergency => "emergency",
        };
        write!(f, "{s}")
    }
}

/// The outcome of a generic infrastructure operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub status: Status,
    pub data: Option<T>,
    pub error: Option<String>,
    pub completed_at: DateTime<Utc>,
    pub duration: Duration,
}

impl<T> OperationResult<T> {
    #[must_use]
    pub fn success(data: T, completed_at: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            status: Status::Completed,
            data: Some(data),
            error: None,
            completed_at,
            duration,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>, completed_at: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            status: Status::Failed,
            data: None,
            error: Some(error.into()),
            completed_at,
            duration,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Ambient context passed alongside a generic infrastructure operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationContext {
    pub operation_id: String,
    pub execution_id: Option<ExecutionId>,
    pub workflow_id: Option<WorkflowId>,
    pub node_id: Option<NodeId>,
    pub user_id: Option<UserId>,
    pub tenant_id: Option<TenantId>,
    pub priority: Priority,
    pub metadata: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl OperationContext {
    #[must_use]
    pub fn new(operation_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            operation_id: operation_id.into(),
            execution_id: None,
            workflow_id: None,
            node_id: None,
            user_id: None,
            tenant_id: None,
            priority: Priority::default(),
            metadata: HashMap::new(),
            created_at,
        }
    }

    #[must_use]
    pub fn with_execution(mut self, execution_id: ExecutionId) -> Self {
        self.execution_id = Some(execution_id);
        self
    }

    #[must_use]
    pub fn with_workflow(mut self, workflow_id: WorkflowId) -> Self {
        self.workflow_id = Some(workflow_id);
        self
    }

    #[must_use]
    pub fn with_node(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub mod utils {
    use super::{DateTime, Utc};

    #[must_use]
    pub fn generate_operation_id(now: DateTime<Utc>, sequence: u64) -> String {
        format!("op-{}-{sequence}", now.timestamp_millis())
    }

    #[must_use]
    pub fn format_duration(duration: std::time::Duration) -> String {
        let secs = duration.as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m{}s", secs / 60, secs % 60)
        } else {
            format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
        }
    }

    #[must_use]
    pub fn parse_version(s: &str) -> Option<super::Version> {
        let (core, pre) = match s.split_once('-') {
            Some((c, p)) => (c, Some(p.to_string())),
            None => (s, None),
        };
        let mut parts = core.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        let mut version = super::Version::new(major, minor, patch);
        if let Some(pre) = pre {
            version = version.with_pre(pre);
        }
        Some(version)
    }

    #[must_use]
    pub fn is_valid_identifier(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_version_displays_as_major_minor() {
        assert_eq!(InterfaceVersion::new(1, 2).to_string(), "1.2");
    }

    #[test]
    fn interface_version_compatibility_is_by_major() {
        assert!(InterfaceVersion::new(1, 0).is_compatible_with(&InterfaceVersion::new(1, 5)));
        assert!(!InterfaceVersion::new(1, 0).is_compatible_with(&InterfaceVersion::new(2, 0)));
    }

    #[test]
    fn version_orders_by_major_minor_patch() {
        assert!(Version::new(1, 0, 0) < Version::new(1, 1, 0));
        assert!(Version::new(1, 1, 0) < Version::new(2, 0, 0));
    }

    #[test]
    fn version_display_includes_pre_and_build() {
        let v = Version::new(1, 0, 0).with_pre("beta").with_build("001");
        assert_eq!(v.to_string(), "1.0.0-beta+001");
    }

    #[test]
    fn status_classification() {
        assert!(Status::Completed.is_success());
        assert!(Status::Failed.is_failure());
        assert!(Status::InProgress.is_active());
        assert!(Status::Cancelled.is_completed());
    }

    #[test]
    fn priority_ordering_and_urgency() {
        assert!(Priority::Critical > Priority::Normal);
        assert!(Priority::Critical.is_urgent());
        assert!(!Priority::Low.is_urgent());
    }

    #[test]
    fn operation_result_success_and_failure() {
        let now = Utc::now();
        let ok = OperationResult::success(42, now, Duration::from_secs(1));
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&42));

        let err: OperationResult<i32> = OperationResult::failure("boom", now, Duration::from_secs(1));
        assert!(err.is_failure());
        assert_eq!(err.error(), Some("boom"));
    }

    #[test]
    fn operation_context_builder() {
        let now = Utc::now();
        let execution_id = ExecutionId::v4();
        let ctx = OperationContext::new("op-1", now)
            .with_execution(execution_id)
            .with_priority(Priority::High)
            .with_metadata("key", "value");
        assert_eq!(ctx.execution_id, Some(execution_id));
        assert_eq!(ctx.priority, Priority::High);
        assert_eq!(ctx.metadata.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn utils_parse_version_roundtrips_core() {
        let v = utils::parse_version("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn utils_is_valid_identifier() {
        assert!(utils::is_valid_identifier("valid_name-1"));
        assert!(!utils::is_valid_identifier("1invalid"));
    }
}
