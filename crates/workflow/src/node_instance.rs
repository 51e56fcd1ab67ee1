//! A node instance: one node as it appears inside a specific workflow,
//! before it has been materialized against its spec.

use floe_core::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node_type::NodeCategory;

/// One node inside a [`crate::workflow::Workflow`].
///
/// `configurations`/`input_params`/`output_params` carry only the values the
/// workflow author set explicitly; defaults from the node's spec are filled
/// in later by the Spec Registry's `Materialize` step, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInstance {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub category: NodeCategory,
    pub subtype: String,
    #[serde(default)]
    pub configurations: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub input_params: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub output_params: IndexMap<String, serde_json::Value>,
    /// Ids of TOOL/MEMORY nodes attached to this node. Only ever non-empty
    /// when `category.allows_attached_nodes()`.
    #[serde(default)]
    pub attached_nodes: Vec<NodeId>,
    /// Editor canvas position. Opaque to the engine; carried through
    /// unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<serde_json::Value>,
}

impl NodeInstance {
    #[must_use]
    pub fn new(id: NodeId, category: NodeCategory, subtype: impl Into<String>) -> Self {
        Self {
            id,
            category,
            subtype: subtype.into(),
            configurations: IndexMap::new(),
            input_params: IndexMap::new(),
            output_params: IndexMap::new(),
            attached_nodes: Vec::new(),
            position: None,
        }
    }

    #[must_use]
    pub fn with_configuration(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.configurations.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_attached_node(mut self, node_id: NodeId) -> Self {
        self.attached_nodes.push(node_id);
        self
    }

    /// Whether this is a TRIGGER node, the only legal entry point of a
    /// workflow's main graph.
    #[must_use]
    pub fn is_trigger(&self) -> bool {
        self.category == NodeCategory::Trigger
    }

    /// Whether this node may be a `FLOW.LOOP` self-loop target; the only
    /// category for which a self-referencing edge is not a cycle violation.
    #[must_use]
    pub fn allows_self_loop(&self) -> bool {
        self.category == NodeCategory::Flow && self.subtype.eq_ignore_ascii_case("loop")
    }
}
