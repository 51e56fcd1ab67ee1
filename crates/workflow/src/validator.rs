//! The Workflow Validator (spec §4.2): runs topology, configuration,
//! attachment, conversion, and cycle checks over a [`crate::workflow::Workflow`],
//! accumulating every failure instead of stopping at the first.

use std::collections::{HashMap, HashSet};

use floe_core::NodeId;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;

use crate::connection::{FLOW_IF_FALSE, FLOW_IF_TRUE};
use crate::error::{WorkflowError, WorkflowWarning};
use crate::node_type::NodeCategory;
use crate::workflow::Workflow;

/// What the Spec Registry exposes to the validator: whether a
/// `(category, subtype)` pair is known, its declared output keys, and
/// configuration validation.
///
/// A thin seam so this crate does not depend on the node registry crate;
/// implement it as an adapter over whatever registry is in scope (see
/// `floe-node::registry`).
pub trait SpecLookup {
    fn exists(&self, category: NodeCategory, subtype: &str) -> bool;

    /// Declared output schema keys for this node's spec. `FLOW.IF`'s
    /// `true`/`false` and `FLOW.SWITCH`'s case labels are validated
    /// separately and need not appear here.
    fn output_keys(&self, category: NodeCategory, subtype: &str) -> HashSet<String>;

    fn validate_config(
        &self,
        category: NodeCategory,
        subtype: &str,
        config: &indexmap::IndexMap<String, serde_json::Value>,
    ) -> Vec<floe_schema::SchemaError>;
}

/// Result of a validation run: hard failures plus non-fatal warnings.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<WorkflowError>,
    pub warnings: Vec<WorkflowWarning>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every check in spec order, accumulating failures.
pub fn validate(workflow: &Workflow, registry: &dyn SpecLookup) -> ValidationReport {
    let mut report = ValidationReport::default();

    // 1. Node identity: unique ids, each resolves in the registry.
    let mut seen_ids = HashSet::new();
    for node in &workflow.nodes {
        if !seen_ids.insert(node.id) {
            report.errors.push(WorkflowError::DuplicateNodeId(node.id));
        }
        if !registry.exists(node.category, &node.subtype) {
            report.errors.push(WorkflowError::UnknownSubtype {
                node: node.id,
                subtype: node.subtype.clone(),
            });
        }
    }

    let nodes_by_id: HashMap<NodeId, &crate::node_instance::NodeInstance> =
        workflow.nodes.iter().map(|n| (n.id, n)).collect();

    // 2. Configuration: per-node ValidateConfig.
    for node in &workflow.nodes {
        for source in registry.validate_config(node.category, &node.subtype, &node.configurations)
        {
            report.errors.push(WorkflowError::Config {
                node: node.id,
                source,
            });
        }
    }

    // 3. Connection endpoints exist; no self-loop unless FLOW.LOOP.
    for conn in &workflow.connections {
        let from = nodes_by_id.get(&conn.from_node);
        let to = nodes_by_id.get(&conn.to_node);
        if from.is_none() {
            report.errors.push(WorkflowError::DanglingEndpoint {
                connection: conn.id,
                node: conn.from_node,
            });
        }
        if to.is_none() {
            report.errors.push(WorkflowError::DanglingEndpoint {
                connection: conn.id,
                node: conn.to_node,
            });
        }
        if conn.is_self_loop() {
            if let Some(from_node) = from {
                if !from_node.allows_self_loop() {
                    report.errors.push(WorkflowError::IllegalSelfLoop {
                        connection: conn.id,
                        node: conn.from_node,
                    });
                }
            }
        }
    }

    // 4. Output keys: edge.output_key declared by from_node's spec output
    //    schema, or a permitted special key.
    for conn in &workflow.connections {
        if let Some(from_node) = nodes_by_id.get(&conn.from_node) {
            let allowed = match from_node.category {
                NodeCategory::Flow if from_node.subtype.eq_ignore_ascii_case("if") => {
                    conn.output_key == FLOW_IF_TRUE || conn.output_key == FLOW_IF_FALSE
                }
                _ => {
                    let declared = registry.output_keys(from_node.category, &from_node.subtype);
                    declared.is_empty() || declared.contains(&conn.output_key)
                }
            };
            if !allowed {
                report.errors.push(WorkflowError::UnknownOutputKey {
                    connection: conn.id,
                    node: conn.from_node,
                    output_key: conn.output_key.clone(),
                });
            }
        }
    }

    // Duplicate (from_node, output_key, to_node) edges are forbidden.
    let mut seen_edges = HashSet::new();
    for conn in &workflow.connections {
        if !seen_edges.insert(conn.identity()) {
            report.errors.push(WorkflowError::DuplicateConnection {
                from: conn.from_node,
                output_key: conn.output_key.clone(),
                to: conn.to_node,
            });
        }
    }

    // 5. Attached nodes: only AI_AGENT may declare them; each must exist
    //    and have type TOOL or MEMORY; must not appear as a main-graph edge
    //    endpoint.
    let mut attached_ids = HashSet::new();
    for node in &workflow.nodes {
        if !node.attached_nodes.is_empty() && !node.category.allows_attached_nodes() {
            report
                .errors
                .push(WorkflowError::AttachmentNotAllowed { owner: node.id });
        }
        for attached_id in &node.attached_nodes {
            attached_ids.insert(*attached_id);
            match nodes_by_id.get(attached_id) {
                None => report.errors.push(WorkflowError::UnknownAttachedNode {
                    owner: node.id,
                    attached: *attached_id,
                }),
                Some(attached) if !attached.category.is_attachable() => {
                    report.errors.push(WorkflowError::IllegalAttachedCategory {
                        attached: *attached_id,
                        category: attached.category.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }
    for conn in &workflow.connections {
        if attached_ids.contains(&conn.from_node) || attached_ids.contains(&conn.to_node) {
            let offender = if attached_ids.contains(&conn.from_node) {
                conn.from_node
            } else {
                conn.to_node
            };
            report
                .errors
                .push(WorkflowError::AttachedNodeInMainGraph { attached: offender });
        }
    }

    // 6. Reachability: a single TRIGGER node must be reachable; unreachable
    //    nodes are warnings.
    let main_graph_ids: Vec<NodeId> = workflow
        .nodes
        .iter()
        .map(|n| n.id)
        .filter(|id| !attached_ids.contains(id))
        .collect();

    let triggers: Vec<NodeId> = main_graph_ids
        .iter()
        .copied()
        .filter(|id| nodes_by_id[id].is_trigger())
        .collect();

    match triggers.len() {
        0 => report.errors.push(WorkflowError::NoReachableTrigger),
        1 => {
            let reachable = reachable_from(&main_graph_ids, &workflow.connections, triggers[0]);
            for id in &main_graph_ids {
                if !reachable.contains(id) {
                    report.warnings.push(WorkflowWarning::UnreachableNode(*id));
                }
            }
        }
        _ => report
            .errors
            .push(WorkflowError::MultipleReachableTriggers(triggers)),
    }

    // 7. Conversion functions: each non-empty conversion_function parses
    //    and conforms to `def convert(input_data) -> output_data`.
    for conn in &workflow.connections {
        if let Some(src) = &conn.conversion_function {
            if !src.trim().is_empty() {
                if let Err(reason) = check_conversion_signature(src) {
                    report.errors.push(WorkflowError::InvalidConversion {
                        connection: conn.id,
                        reason,
                    });
                }
            }
        }
    }

    // 8. Cycle check on the edge set excluding self-loops on FLOW.LOOP.
    let mut graph = DiGraph::<NodeId, ()>::new();
    let mut index_of = HashMap::new();
    for id in &main_graph_ids {
        let idx = graph.add_node(*id);
        index_of.insert(*id, idx);
    }
    for conn in &workflow.connections {
        if conn.is_self_loop() {
            continue;
        }
        if let (Some(&from_idx), Some(&to_idx)) =
            (index_of.get(&conn.from_node), index_of.get(&conn.to_node))
        {
            graph.add_edge(from_idx, to_idx, ());
        }
    }
    if is_cyclic_directed(&graph) {
        if let Some(&offending) = main_graph_ids.first() {
            report.errors.push(WorkflowError::Cycle(offending));
        }
    }

    report
}

fn reachable_from(
    universe: &[NodeId],
    connections: &[crate::connection::Connection],
    start: NodeId,
) -> HashSet<NodeId> {
    let universe: HashSet<NodeId> = universe.iter().copied().collect();
    let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for conn in connections {
        adjacency
            .entry(conn.from_node)
            .or_default()
            .push(conn.to_node);
    }

    let mut visited = HashSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(next) = adjacency.get(&id) {
            for &n in next {
                if universe.contains(&n) && !visited.contains(&n) {
                    stack.push(n);
                }
            }
        }
    }
    visited
}

/// Minimal shape check for `def convert(input_data) -> output_data`.
/// Full parsing and sandboxed evaluation lives in the Conversion Runtime
/// (spec §4.8); this only guards the Validator's signature requirement.
fn check_conversion_signature(src: &str) -> Result<(), String> {
    let trimmed = src.trim_start();
    if !trimmed.starts_with("def convert(input_data)") {
        return Err("must declare `def convert(input_data) -> output_data`".to_string());
    }
    if !src.contains("return") {
        return Err("body must contain a `return` statement".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Connection;
    use crate::node_instance::NodeInstance;
    use crate::workflow::Workflow;
    use std::collections::HashSet as Set;

    struct StubRegistry;

    impl SpecLookup for StubRegistry {
        fn exists(&self, _category: NodeCategory, subtype: &str) -> bool {
            subtype != "bogus"
        }

        fn output_keys(&self, _category: NodeCategory, _subtype: &str) -> Set<String> {
            Set::new()
        }

        fn validate_config(
            &self,
            _category: NodeCategory,
            _subtype: &str,
            _config: &indexmap::IndexMap<String, serde_json::Value>,
        ) -> Vec<floe_schema::SchemaError> {
            Vec::new()
        }
    }

    fn trigger() -> NodeInstance {
        NodeInstance::new(NodeId::v4(), NodeCategory::Trigger, "manual")
    }

    fn action() -> NodeInstance {
        NodeInstance::new(NodeId::v4(), NodeCategory::Action, "http_request")
    }

    #[test]
    fn simple_linear_workflow_is_valid() {
        let trigger = trigger();
        let action = action();
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "linear")
            .with_node(trigger.clone())
            .with_node(action.clone())
            .with_connection(Connection::new(trigger.id, action.id));

        let report = validate(&workflow, &StubRegistry);
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_trigger_is_an_error() {
        let action = action();
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "no-trigger").with_node(action);
        let report = validate(&workflow, &StubRegistry);
        assert!(matches!(
            report.errors[0],
            WorkflowError::NoReachableTrigger
        ));
    }

    #[test]
    fn unreachable_node_is_a_warning_not_an_error() {
        let trigger = trigger();
        let orphan = action();
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "orphan")
            .with_node(trigger)
            .with_node(orphan);
        let report = validate(&workflow, &StubRegistry);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn dangling_connection_endpoint_is_reported() {
        let trigger = trigger();
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "dangling")
            .with_node(trigger.clone())
            .with_connection(Connection::new(trigger.id, NodeId::v4()));
        let report = validate(&workflow, &StubRegistry);
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, WorkflowError::DanglingEndpoint { .. })));
    }

    #[test]
    fn cycle_between_actions_is_detected() {
        let trigger = trigger();
        let a = action();
        let b = action();
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "cycle")
            .with_node(trigger.clone())
            .with_node(a.clone())
            .with_node(b.clone())
            .with_connection(Connection::new(trigger.id, a.id))
            .with_connection(Connection::new(a.id, b.id))
            .with_connection(Connection::new(b.id, a.id));
        let report = validate(&workflow, &StubRegistry);
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, WorkflowError::Cycle(_))));
    }

    #[test]
    fn flow_loop_self_loop_is_allowed() {
        let trigger = trigger();
        let looper = NodeInstance::new(NodeId::v4(), NodeCategory::Flow, "loop");
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "loop")
            .with_node(trigger.clone())
            .with_node(looper.clone())
            .with_connection(Connection::new(trigger.id, looper.id))
            .with_connection(Connection::new(looper.id, looper.id));
        let report = validate(&workflow, &StubRegistry);
        assert!(
            !report
                .errors
                .iter()
                .any(|e| matches!(e, WorkflowError::IllegalSelfLoop { .. })),
            "{:?}",
            report.errors
        );
    }

    #[test]
    fn attached_node_on_non_agent_is_rejected() {
        let trigger = trigger();
        let memory = NodeInstance::new(NodeId::v4(), NodeCategory::Memory, "buffer");
        let action = action().with_attached_node(memory.id);
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "bad-attach")
            .with_node(trigger.clone())
            .with_node(action.clone())
            .with_node(memory)
            .with_connection(Connection::new(trigger.id, action.id));
        let report = validate(&workflow, &StubRegistry);
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, WorkflowError::AttachmentNotAllowed { .. })));
    }

    #[test]
    fn unknown_subtype_is_rejected() {
        let trigger = trigger();
        let bogus = NodeInstance::new(NodeId::v4(), NodeCategory::Action, "bogus");
        let workflow = Workflow::new(floe_core::WorkflowId::v4(), "bad-subtype")
            .with_node(trigger.clone())
            .with_node(bogus.clone())
            .with_connection(Connection::new(trigger.id, bogus.id));
        let report = validate(&workflow, &StubRegistry);
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, WorkflowError::UnknownSubtype { .. })));
    }
}
