//! The execution graph: predecessor/successor edges and readiness, built
//! once per execution from a validated [`floe_workflow::Workflow`].
//!
//! This crate does not depend on `floe-node`'s spec registry, so readiness
//! here is structural (which edges have delivered a value into
//! `pending_inputs`) rather than schema-aware (which input keys a node's
//! spec actually requires). The scheduler, which does hold the registry,
//! decides *how* to interpret readiness for a given node category.

use std::collections::HashMap;

use floe_core::NodeId;
use floe_workflow::{Connection, Workflow};
use serde::{Deserialize, Serialize};

/// One edge as seen from either endpoint: the output key it carries and its
/// optional conversion function text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub output_key: String,
    pub conversion: Option<String>,
}

impl GraphEdge {
    fn from_connection(conn: &Connection) -> Self {
        Self {
            from: conn.from_node,
            to: conn.to_node,
            output_key: conn.output_key.clone(),
            conversion: conn.conversion_function.clone(),
        }
    }
}

/// How a node decides it is ready to dispatch, given the set of input keys
/// its predecessors have so far delivered. See spec §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessMode {
    /// Every predecessor edge must have delivered (ordinary nodes).
    AllPredecessors,
    /// `FLOW.MERGE mode="any"` — fires once the first branch delivers.
    MergeAny,
    /// `FLOW.MERGE mode="all"` — fires once every branch has delivered.
    MergeAll,
    /// `FLOW.LOOP` — ready once its single upstream collection is present;
    /// fan-out accounting for successors is the scheduler's responsibility.
    LoopCollection,
}

/// Predecessor and successor edges for every node in a workflow, keyed by
/// node id.
#[derive(Debug, Clone, Default)]
pub struct ExecutionGraph {
    predecessors: HashMap<NodeId, Vec<GraphEdge>>,
    successors: HashMap<NodeId, Vec<GraphEdge>>,
}

impl ExecutionGraph {
    /// Build the graph from a validated workflow. Self-loops (legal only on
    /// `FLOW.LOOP` nodes) appear as both a predecessor and successor edge of
    /// the same node.
    #[must_use]
    pub fn build(workflow: &Workflow) -> Self {
        let mut predecessors: HashMap<NodeId, Vec<GraphEdge>> = HashMap::new();
        let mut successors: HashMap<NodeId, Vec<GraphEdge>> = HashMap::new();

        for node in &workflow.nodes {
            predecessors.entry(node.id).or_default();
            successors.entry(node.id).or_default();
        }

        for conn in &workflow.connections {
            let edge = GraphEdge::from_connection(conn);
            successors.entry(conn.from_node).or_default().push(edge.clone());
            predecessors.entry(conn.to_node).or_default().push(edge);
        }

        Self {
            predecessors,
            successors,
        }
    }

    /// Edges delivering into `node`.
    #[must_use]
    pub fn predecessors(&self, node: NodeId) -> &[GraphEdge] {
        self.predecessors.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Edges leaving `node`, grouped implicitly by `output_key` (filter the
    /// slice by `output_key` to get one output's fan-out).
    #[must_use]
    pub fn successors(&self, node: NodeId) -> &[GraphEdge] {
        self.successors.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Whether `node` is ready to dispatch given the input keys its
    /// predecessors have delivered so far (spec §4.3).
    ///
    /// A node with no predecessors (a `TRIGGER`) is always ready.
    #[must_use]
    pub fn is_ready(
        &self,
        node: NodeId,
        delivered_keys: &std::collections::HashSet<String>,
        mode: ReadinessMode,
    ) -> bool {
        let preds = self.predecessors(node);
        if preds.is_empty() {
            return true;
        }
        match mode {
            ReadinessMode::AllPredecessors | ReadinessMode::MergeAll => preds
                .iter()
                .all(|e| delivered_keys.contains(&e.output_key)),
            ReadinessMode::MergeAny => preds
                .iter()
                .any(|e| delivered_keys.contains(&e.output_key)),
            ReadinessMode::LoopCollection => !delivered_keys.is_empty(),
        }
    }
}
