//! The node category a [`crate::node_instance::NodeInstance`] belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level node category, matching the Spec Registry's `type` axis of the
/// `(type, subtype)` lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeCategory {
    Trigger,
    AiAgent,
    ExternalAction,
    Action,
    Flow,
    HumanInTheLoop,
    Tool,
    Memory,
}

impl NodeCategory {
    /// Whether nodes of this category may declare `attached_nodes`.
    ///
    /// Only `AI_AGENT` may attach TOOL/MEMORY nodes; every other category
    /// must declare "not applicable".
    #[must_use]
    pub fn allows_attached_nodes(self) -> bool {
        matches!(self, Self::AiAgent)
    }

    /// Whether this category is a legal target for an `attached_nodes`
    /// reference (only TOOL and MEMORY nodes may be attached).
    #[must_use]
    pub fn is_attachable(self) -> bool {
        matches!(self, Self::Tool | Self::Memory)
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Trigger => "TRIGGER",
            Self::AiAgent => "AI_AGENT",
            Self::ExternalAction => "EXTERNAL_ACTION",
            Self::Action => "ACTION",
            Self::Flow => "FLOW",
            Self::HumanInTheLoop => "HUMAN_IN_THE_LOOP",
            Self::Tool => "TOOL",
            Self::Memory => "MEMORY",
        };
        f.write_str(s)
    }
}
