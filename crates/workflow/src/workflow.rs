//! The top-level workflow definition: nodes, connections, and settings.

use floe_core::WorkflowId;
use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::node_instance::NodeInstance;
use crate::settings::WorkflowSettings;

/// A user-defined workflow: a set of node instances, the connections
/// between them, and per-execution settings.
///
/// Structural invariants (unique node ids, resolvable edge endpoints, at
/// most one reachable trigger, ...) are checked by
/// [`crate::validator::validate`], not enforced by construction -- a
/// `Workflow` may be built incrementally in an invalid intermediate state
/// while an editor is composing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: WorkflowId,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeInstance>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub settings: WorkflowSettings,
}

impl Workflow {
    #[must_use]
    pub fn new(id: WorkflowId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
            settings: WorkflowSettings::default(),
        }
    }

    #[must_use]
    pub fn with_node(mut self, node: NodeInstance) -> Self {
        self.nodes.push(node);
        self
    }

    #[must_use]
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn node(&self, id: floe_core::NodeId) -> Option<&NodeInstance> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Outgoing connections from a node, in declaration order.
    #[must_use]
    pub fn outgoing(&self, id: floe_core::NodeId) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.from_node == id)
            .collect()
    }

    /// Incoming connections into a node, in declaration order.
    #[must_use]
    pub fn incoming(&self, id: floe_core::NodeId) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.to_node == id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_type::NodeCategory;

    #[test]
    fn outgoing_and_incoming_filter_by_node() {
        let a = NodeInstance::new(floe_core::NodeId::v4(), NodeCategory::Trigger, "manual");
        let b = NodeInstance::new(floe_core::NodeId::v4(), NodeCategory::Action, "http");
        let workflow = Workflow::new(WorkflowId::v4(), "wf")
            .with_node(a.clone())
            .with_node(b.clone())
            .with_connection(Connection::new(a.id, b.id));

        assert_eq!(workflow.outgoing(a.id).len(), 1);
        assert_eq!(workflow.incoming(b.id).len(), 1);
        assert!(workflow.incoming(a.id).is_empty());
    }

    #[test]
    fn node_lookup_by_id() {
        let a = NodeInstance::new(floe_core::NodeId::v4(), NodeCategory::Trigger, "manual");
        let workflow = Workflow::new(WorkflowId::v4(), "wf").with_node(a.clone());
        assert!(workflow.node(a.id).is_some());
        assert!(workflow.node(floe_core::NodeId::v4()).is_none());
    }
}
