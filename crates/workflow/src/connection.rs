//! Edges between node instances, carrying an output-key selector and an
//! optional conversion function.

use floe_core::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The default output key, used by every node category except FLOW.IF
/// and FLOW.SWITCH.
pub const DEFAULT_OUTPUT_KEY: &str = "result";

/// FLOW.IF's two special output keys.
pub const FLOW_IF_TRUE: &str = "true";
pub const FLOW_IF_FALSE: &str = "false";

/// One edge in a workflow's connection graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: Uuid,
    pub from_node: NodeId,
    pub to_node: NodeId,
    /// Selects which logical output of `from_node` this edge carries.
    /// Defaults to [`DEFAULT_OUTPUT_KEY`].
    #[serde(default = "default_output_key")]
    pub output_key: String,
    /// Source text for `def convert(input_data) -> output_data`. Missing or
    /// empty means identity passthrough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_function: Option<String>,
}

fn default_output_key() -> String {
    DEFAULT_OUTPUT_KEY.to_string()
}

impl Connection {
    #[must_use]
    pub fn new(from_node: NodeId, to_node: NodeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_node,
            to_node,
            output_key: default_output_key(),
            conversion_function: None,
        }
    }

    #[must_use]
    pub fn with_output_key(mut self, output_key: impl Into<String>) -> Self {
        self.output_key = output_key.into();
        self
    }

    #[must_use]
    pub fn with_conversion(mut self, conversion_function: impl Into<String>) -> Self {
        self.conversion_function = Some(conversion_function.into());
        self
    }

    /// Identity tuple used to detect duplicate `(from_node, output_key,
    /// to_node)` edges, which the workflow data model forbids.
    #[must_use]
    pub fn identity(&self) -> (NodeId, &str, NodeId) {
        (self.from_node, &self.output_key, self.to_node)
    }

    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from_node == self.to_node
    }

    #[must_use]
    pub fn has_conversion(&self) -> bool {
        self.conversion_function
            .as_ref()
            .is_some_and(|src| !src.trim().is_empty())
    }
}
