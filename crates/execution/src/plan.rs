//! Execution planning — builds a parallel execution schedule from a workflow.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use floe_action::ExecutionBudget;
use floe_core::{ExecutionId, NodeId, WorkflowId};
use floe_workflow::Workflow;
use serde::{Deserialize, Serialize};

use crate::error::ExecutionError;

/// A pre-computed execution plan derived from a workflow definition.
///
/// `parallel_groups` is a topological layering of the workflow's node graph
/// (self-loops excluded, since those are legal only on `FLOW.LOOP` and do
/// not constrain scheduling order): each group's nodes have no edges among
/// themselves and may be dispatched concurrently once their turn comes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// Execution this plan belongs to.
    pub execution_id: ExecutionId,
    /// Workflow this plan was derived from.
    pub workflow_id: WorkflowId,
    /// Parallel execution groups (each group can run concurrently).
    pub parallel_groups: Vec<Vec<NodeId>>,
    /// Nodes with no predecessors (start points).
    pub entry_nodes: Vec<NodeId>,
    /// Nodes with no successors (end points).
    pub exit_nodes: Vec<NodeId>,
    /// Total number of nodes in the plan.
    pub total_nodes: usize,
    /// Resource budget for this execution.
    pub budget: ExecutionBudget,
    /// When this plan was created.
    pub created_at: DateTime<Utc>,
}

impl ExecutionPlan {
    /// Build an execution plan from a workflow definition.
    ///
    /// Expects an already-[validated](floe_workflow::validate) workflow: a
    /// workflow with a real cycle (as opposed to a `FLOW.LOOP` self-loop)
    /// should never reach this call.
    pub fn from_workflow(
        execution_id: ExecutionId,
        workflow: &Workflow,
        budget: ExecutionBudget,
    ) -> Result<Self, ExecutionError> {
        if workflow.nodes.is_empty() {
            return Err(ExecutionError::PlanValidation(
                "workflow has no nodes".into(),
            ));
        }

        let mut in_degree: HashMap<NodeId, usize> = HashMap::new();
        let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for node in &workflow.nodes {
            in_degree.insert(node.id, 0);
            successors.insert(node.id, Vec::new());
        }
        for conn in &workflow.connections {
            if conn.is_self_loop() {
                continue;
            }
            successors.entry(conn.from_node).or_default().push(conn.to_node);
            *in_degree.entry(conn.to_node).or_insert(0) += 1;
        }

        let entry_nodes: Vec<NodeId> = workflow
            .nodes
            .iter()
            .map(|n| n.id)
            .filter(|id| in_degree[id] == 0)
            .collect();
        let exit_nodes: Vec<NodeId> = workflow
            .nodes
            .iter()
            .map(|n| n.id)
            .filter(|id| successors[id].is_empty())
            .collect();

        let mut remaining = in_degree.clone();
        let mut current_level = entry_nodes.clone();
        let mut parallel_groups = Vec::new();
        let mut processed = 0usize;

        while !current_level.is_empty() {
            processed += current_level.len();
            parallel_groups.push(current_level.clone());

            let mut next_level = Vec::new();
            for id in &current_level {
                for succ in &successors[id] {
                    let deg = remaining.get_mut(succ).expect("successor tracked");
                    *deg -= 1;
                    if *deg == 0 {
                        next_level.push(*succ);
                    }
                }
            }
            current_level = next_level;
        }

        if processed != workflow.nodes.len() {
            return Err(ExecutionError::PlanValidation(
                "graph construction failed: workflow contains a cycle".into(),
            ));
        }

        Ok(Self {
            execution_id,
            workflow_id: workflow.id,
            parallel_groups,
            entry_nodes,
            exit_nodes,
            total_nodes: workflow.nodes.len(),
            budget,
            created_at: Utc::now(),
        })
    }
}
