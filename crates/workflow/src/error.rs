//! Workflow validation failures.

use floe_core::NodeId;
use floe_error::{Classify, ErrorKind};
use floe_schema::SchemaError;
use thiserror::Error;

/// One validation failure, accumulated by [`crate::validator::validate`]
/// rather than raised as a fail-fast error.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(NodeId),

    #[error("node `{node}` has unknown subtype `{subtype}`")]
    UnknownSubtype { node: NodeId, subtype: String },

    #[error("node `{node}` configuration invalid: {source}")]
    Config { node: NodeId, source: SchemaError },

    #[error("connection `{connection}` references unknown node `{node}`")]
    DanglingEndpoint {
        connection: uuid::Uuid,
        node: NodeId,
    },

    #[error("connection `{connection}` is a self-loop on a non-FLOW.LOOP node `{node}`")]
    IllegalSelfLoop {
        connection: uuid::Uuid,
        node: NodeId,
    },

    #[error(
        "connection `{connection}` output key `{output_key}` is not declared by node `{node}`'s spec"
    )]
    UnknownOutputKey {
        connection: uuid::Uuid,
        node: NodeId,
        output_key: String,
    },

    #[error("duplicate connection from `{from}` output `{output_key}` to `{to}`")]
    DuplicateConnection {
        from: NodeId,
        output_key: String,
        to: NodeId,
    },

    #[error("attached node `{attached}` referenced by `{owner}` does not exist")]
    UnknownAttachedNode { owner: NodeId, attached: NodeId },

    #[error("node `{owner}` may not declare attached nodes (only AI_AGENT may)")]
    AttachmentNotAllowed { owner: NodeId },

    #[error("attached node `{attached}` must be TOOL or MEMORY, not `{category}`")]
    IllegalAttachedCategory { attached: NodeId, category: String },

    #[error("attached node `{attached}` must not appear as an endpoint of a main-graph edge")]
    AttachedNodeInMainGraph { attached: NodeId },

    #[error("no TRIGGER node is reachable")]
    NoReachableTrigger,

    #[error("more than one TRIGGER node is reachable: {0:?}")]
    MultipleReachableTriggers(Vec<NodeId>),

    #[error("conversion function on connection `{connection}` is invalid: {reason}")]
    InvalidConversion { connection: uuid::Uuid, reason: String },

    #[error("workflow graph contains a cycle through node `{0}`")]
    Cycle(NodeId),
}

impl WorkflowError {
    /// Registry-documented failure-kind code for this error, grouped per
    /// the Validator's five kinds.
    #[must_use]
    pub fn kind_code(&self) -> &'static str {
        match self {
            Self::DuplicateNodeId(_)
            | Self::DanglingEndpoint { .. }
            | Self::IllegalSelfLoop { .. }
            | Self::NoReachableTrigger
            | Self::MultipleReachableTriggers(_) => "VALIDATION_TOPOLOGY",
            Self::UnknownSubtype { .. } | Self::Config { .. } => "VALIDATION_CONFIG",
            Self::UnknownOutputKey { .. } | Self::DuplicateConnection { .. } => {
                "VALIDATION_TOPOLOGY"
            }
            Self::UnknownAttachedNode { .. }
            | Self::AttachmentNotAllowed { .. }
            | Self::IllegalAttachedCategory { .. }
            | Self::AttachedNodeInMainGraph { .. } => "VALIDATION_ATTACHED",
            Self::InvalidConversion { .. } => "VALIDATION_CONVERSION",
            Self::Cycle(_) => "VALIDATION_CYCLE",
        }
    }
}

impl Classify for WorkflowError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// A warning: non-fatal per the Validator's reachability check.
#[derive(Debug, Clone, Error)]
pub enum WorkflowWarning {
    #[error("node `{0}` is unreachable from the trigger")]
    UnreachableNode(NodeId),
}
