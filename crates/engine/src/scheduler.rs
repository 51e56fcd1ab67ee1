//! The scheduler: drives a workflow execution from its trigger to a
//! terminal state, per spec §4.4's ready-frontier loop.
//!
//! Each iteration: compute the ready frontier, dispatch it concurrently
//! through the injected [`SandboxRunner`], route each result's output
//! along matching edges (applying conversions), apply the node's
//! `error_policy` to failures, and check for a suspended (`Waiting`) or
//! deadlocked execution before looping.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use floe_action::result::{ActionResult, WaitCondition};
use floe_action::{
    ActionContext, ActionError, ActionMetadata, ExecutionBudget, SandboxedContext,
};
use floe_core::{ExecutionId, NodeId};
use floe_execution::{
    ExecutionContext, ExecutionGraph, ExecutionState, NodeExecutionState, NodeOutput, NodeState,
    ReadinessMode,
};
use floe_ports::{ExecutionRepo, SandboxRunner};
use floe_workflow::{
    connection::DEFAULT_OUTPUT_KEY, ErrorPolicy, NodeCategory, NodeInstance, Workflow,
};
use tokio::sync::Semaphore;

use crate::conversion::ConversionRuntime;
use crate::error::EngineError;
use crate::spec_registry::SpecRegistry;

/// Tunable limits governing a single engine instance (spec §6
/// Configuration).
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Maximum ready nodes dispatched concurrently.
    pub max_workers: usize,
    /// Lease TTL for the execution this engine instance holds.
    pub lease_ttl: Duration,
    /// Default per-node timeout when a node's own config doesn't set one.
    pub node_timeout: Duration,
    /// Whole-workflow wall-clock budget.
    pub workflow_timeout: Duration,
    /// `FLOW.LOOP`'s default `max_iterations` when unconfigured.
    pub max_loop_iterations: u64,
    /// Maximum retry attempts for a transient node failure.
    pub max_node_retries: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_workers: 8,
            lease_ttl: Duration::from_secs(30),
            node_timeout: Duration::from_secs(60),
            workflow_timeout: Duration::from_secs(3600),
            max_loop_iterations: 10_000,
            max_node_retries: 3,
        }
    }
}

/// The workflow execution engine: a registry of node specs, a sandboxed
/// dispatcher, a persistence/lease backend, and the settings above.
pub struct Engine {
    registry: Arc<SpecRegistry>,
    runner: Arc<dyn SandboxRunner>,
    repo: Arc<dyn ExecutionRepo>,
    conversions: ConversionRuntime,
    settings: EngineSettings,
}

/// Outcome of dispatching a single ready node.
enum Dispatched {
    Success {
        output: serde_json::Value,
        fired_keys: HashSet<String>,
        alternatives: HashMap<String, serde_json::Value>,
    },
    Skipped,
    Waiting {
        condition: WaitCondition,
    },
    Failed(ActionError),
}

impl Engine {
    #[must_use]
    pub fn new(
        registry: Arc<SpecRegistry>,
        runner: Arc<dyn SandboxRunner>,
        repo: Arc<dyn ExecutionRepo>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            registry,
            runner,
            repo,
            conversions: ConversionRuntime::new(),
            settings,
        }
    }

    /// Run a workflow from its trigger node to a terminal (or suspended)
    /// state. Returns the final [`ExecutionState`] -- `Waiting` means the
    /// caller should persist the state and wait for a resume delivery
    /// (spec §4.7) rather than treating this as an error.
    pub async fn run(
        &self,
        workflow: Arc<Workflow>,
        execution_id: ExecutionId,
        trigger_input: serde_json::Value,
    ) -> Result<ExecutionState, EngineError> {
        let node_ids: Vec<NodeId> = workflow.nodes.iter().map(|n| n.id).collect();
        let nodes_by_id: HashMap<NodeId, &NodeInstance> =
            workflow.nodes.iter().map(|n| (n.id, n)).collect();
        let graph = ExecutionGraph::build(&workflow);

        let mut state = ExecutionState::new(execution_id, workflow.id, &node_ids);
        state.transition_status(floe_execution::ExecutionStatus::Running)?;

        let holder = execution_id.to_string();
        self.repo
            .acquire_lease(execution_id, holder.clone(), self.settings.lease_ttl)
            .await?;

        let ctx = ExecutionContext::new(execution_id, workflow.clone(), ExecutionBudget::default());
        ctx.set_node_output(
            NodeId::nil(),
            NodeOutput::inline(trigger_input.clone(), NodeState::Completed, 0),
        );

        let mut delivered: HashMap<NodeId, HashMap<String, serde_json::Value>> = HashMap::new();
        let semaphore = Arc::new(Semaphore::new(self.settings.max_workers.max(1)));
        let started = Instant::now();

        loop {
            if started.elapsed() > self.settings.workflow_timeout {
                state.transition_status(floe_execution::ExecutionStatus::TimedOut)?;
                self.repo.release_lease(execution_id, &holder).await?;
                return Err(EngineError::TimeoutWorkflow {
                    elapsed_seconds: started.elapsed().as_secs(),
                });
            }

            let ready = self.ready_frontier(&workflow, &graph, &state, &delivered, &nodes_by_id);

            if ready.is_empty() {
                if state.all_nodes_terminal() {
                    break;
                }
                let waiting_human = state
                    .node_states
                    .values()
                    .any(|ns| ns.state == NodeState::WaitingHuman);
                if waiting_human {
                    state.transition_status(floe_execution::ExecutionStatus::Waiting)?;
                    self.repo.release_lease(execution_id, &holder).await?;
                    return Ok(state);
                }
                let pending = state
                    .node_states
                    .values()
                    .filter(|ns| !ns.state.is_terminal())
                    .count();
                state.transition_status(floe_execution::ExecutionStatus::Failed)?;
                self.repo.release_lease(execution_id, &holder).await?;
                return Err(EngineError::SchedulerDeadlock { pending });
            }

            let mut handles = Vec::with_capacity(ready.len());
            for node_id in ready {
                state
                    .node_states
                    .get_mut(&node_id)
                    .ok_or(floe_execution::ExecutionError::NodeNotFound(node_id))?
                    .transition_to(NodeState::Ready)?;

                let node = nodes_by_id[&node_id].clone();
                let input = self.resolve_input(node_id, &graph, &delivered, &trigger_input);
                let permit = semaphore.clone().acquire_owned().await.expect("semaphore open");
                let runner = self.runner.clone();
                let exec_ctx = ActionContext::new(execution_id, node_id, workflow.id, ctx_scope());
                handles.push(tokio::spawn(async move {
                    let _permit = permit;
                    let outcome = dispatch_one(runner, exec_ctx, &node, input).await;
                    (node_id, outcome)
                }));
            }

            for handle in handles {
                let (node_id, outcome) = handle.await.expect("dispatch task panicked");
                let node = nodes_by_id[&node_id];
                self.apply_outcome(&mut state, &graph, &mut delivered, node, outcome)?;
            }
        }

        state.transition_status(floe_execution::ExecutionStatus::Completed)?;
        self.repo.release_lease(execution_id, &holder).await?;
        Ok(state)
    }

    fn ready_frontier(
        &self,
        workflow: &Workflow,
        graph: &ExecutionGraph,
        state: &ExecutionState,
        delivered: &HashMap<NodeId, HashMap<String, serde_json::Value>>,
        nodes_by_id: &HashMap<NodeId, &NodeInstance>,
    ) -> Vec<NodeId> {
        workflow
            .nodes
            .iter()
            .filter(|n| {
                state
                    .node_state(n.id)
                    .is_some_and(|ns| ns.state == NodeState::Pending)
            })
            .filter(|n| {
                let mode = readiness_mode(n);
                let keys: HashSet<String> = delivered
                    .get(&n.id)
                    .map(|m| m.keys().cloned().collect())
                    .unwrap_or_default();
                graph.is_ready(n.id, &keys, mode)
            })
            .map(|n| n.id)
            .inspect(|_| {
                let _ = nodes_by_id;
            })
            .collect()
    }

    fn resolve_input(
        &self,
        node_id: NodeId,
        graph: &ExecutionGraph,
        delivered: &HashMap<NodeId, HashMap<String, serde_json::Value>>,
        trigger_input: &serde_json::Value,
    ) -> serde_json::Value {
        if graph.predecessors(node_id).is_empty() {
            return trigger_input.clone();
        }
        let Some(inputs) = delivered.get(&node_id) else {
            return serde_json::Value::Null;
        };
        if inputs.len() == 1 {
            if let Some(v) = inputs.get(DEFAULT_OUTPUT_KEY) {
                return v.clone();
            }
        }
        serde_json::Value::Object(inputs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    fn apply_outcome(
        &self,
        state: &mut ExecutionState,
        graph: &ExecutionGraph,
        delivered: &mut HashMap<NodeId, HashMap<String, serde_json::Value>>,
        node: &NodeInstance,
        outcome: Dispatched,
    ) -> Result<(), EngineError> {
        let ns = state
            .node_states
            .get_mut(&node.id)
            .ok_or(floe_execution::ExecutionError::NodeNotFound(node.id))?;
        ns.transition_to(NodeState::Running)?;

        match outcome {
            Dispatched::Success {
                output,
                fired_keys,
                alternatives,
            } => {
                ns.transition_to(NodeState::Completed)?;
                ns.current_output = Some(NodeOutput::inline(
                    output.clone(),
                    NodeState::Completed,
                    output.to_string().len() as u64,
                ));
                self.route(graph, delivered, node.id, &output, &fired_keys, &alternatives)?;
            }
            Dispatched::Skipped => {
                ns.transition_to(NodeState::Skipped)?;
            }
            Dispatched::Waiting { condition } => {
                ns.transition_to(NodeState::WaitingHuman)?;
                ns.error_message = Some(describe_wait(&condition));
            }
            Dispatched::Failed(err) => {
                let policy = error_policy(node);
                match policy {
                    ErrorPolicy::StopOnError => {
                        ns.transition_to(NodeState::Failed)?;
                        ns.error_message = Some(err.to_string());
                        return Err(EngineError::NodeFailed {
                            node: node.id,
                            error: err.to_string(),
                        });
                    }
                    ErrorPolicy::ContinueRegularOutput => {
                        ns.transition_to(NodeState::Failed)?;
                        ns.error_message = Some(err.to_string());
                    }
                    ErrorPolicy::ContinueErrorOutput => {
                        ns.transition_to(NodeState::Failed)?;
                        ns.error_message = Some(err.to_string());
                        let error_output = serde_json::json!({"error": err.to_string()});
                        let fired: HashSet<String> =
                            ["error".to_string()].into_iter().collect();
                        self.route(
                            graph,
                            delivered,
                            node.id,
                            &error_output,
                            &fired,
                            &HashMap::new(),
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn route(
        &self,
        graph: &ExecutionGraph,
        delivered: &mut HashMap<NodeId, HashMap<String, serde_json::Value>>,
        from: NodeId,
        output: &serde_json::Value,
        fired_keys: &HashSet<String>,
        alternatives: &HashMap<String, serde_json::Value>,
    ) -> Result<(), EngineError> {
        for edge in graph.successors(from) {
            let value = if fired_keys.contains(&edge.output_key) {
                if edge.output_key == DEFAULT_OUTPUT_KEY || edge.output_key == "error" {
                    Some(output.clone())
                } else {
                    alternatives.get(&edge.output_key).cloned().or(Some(output.clone()))
                }
            } else {
                None
            };
            let Some(value) = value else { continue };
            if is_empty_value(&value) {
                continue;
            }
            let converted = match &edge.conversion {
                Some(src) if !src.trim().is_empty() => {
                    self.conversions.convert(src, &value).map_err(|e| {
                        EngineError::ConversionError {
                            connection: uuid::Uuid::nil(),
                            message: e.to_string(),
                        }
                    })?
                }
                _ => value,
            };
            // Last-writer-wins: a later edge into the same (node, key)
            // overwrites an earlier delivery.
            delivered.entry(edge.to).or_default().insert(edge.output_key.clone(), converted);
        }
        Ok(())
    }
}

fn ctx_scope() -> floe_core::scope::ScopeLevel {
    floe_core::scope::ScopeLevel::Global
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    matches!(
        value,
        serde_json::Value::Null
    ) || matches!(value, serde_json::Value::String(s) if s.is_empty())
}

fn readiness_mode(node: &NodeInstance) -> ReadinessMode {
    if node.category == NodeCategory::Flow && node.subtype.eq_ignore_ascii_case("merge") {
        match node.configurations.get("mode").and_then(|v| v.as_str()) {
            Some("any") => ReadinessMode::MergeAny,
            _ => ReadinessMode::MergeAll,
        }
    } else if node.allows_self_loop() {
        ReadinessMode::LoopCollection
    } else {
        ReadinessMode::AllPredecessors
    }
}

/// A node's own `error_policy` configuration overrides the workflow-level
/// default ([`floe_workflow::WorkflowSettings::error_policy`]) when set.
fn error_policy(node: &NodeInstance) -> ErrorPolicy {
    node.configurations
        .get("error_policy")
        .and_then(|v| serde_json::from_value::<ErrorPolicy>(v.clone()).ok())
        .unwrap_or_default()
}

fn describe_wait(condition: &WaitCondition) -> String {
    match condition {
        WaitCondition::Webhook { callback_id } => format!("waiting on webhook `{callback_id}`"),
        WaitCondition::Until { datetime } => format!("waiting until {datetime}"),
        WaitCondition::Duration { duration } => format!("waiting for {duration:?}"),
        WaitCondition::Approval { approver, .. } => format!("waiting on approval from {approver}"),
        WaitCondition::Execution { execution_id } => {
            format!("waiting on execution {execution_id}")
        }
    }
}

async fn dispatch_one(
    runner: Arc<dyn SandboxRunner>,
    ctx: ActionContext,
    node: &NodeInstance,
    input: serde_json::Value,
) -> Dispatched {
    let metadata = ActionMetadata::new(node.subtype.clone(), node.subtype.clone(), "");
    let sandboxed = SandboxedContext::new(ctx, Vec::new());
    match runner.execute(sandboxed, &metadata, input).await {
        Ok(ActionResult::Success { output }) => Dispatched::Success {
            fired_keys: [DEFAULT_OUTPUT_KEY.to_string()].into_iter().collect(),
            output,
            alternatives: HashMap::new(),
        },
        Ok(ActionResult::Skip { .. }) => Dispatched::Skipped,
        Ok(ActionResult::Branch {
            selected,
            output,
            alternatives,
        }) => Dispatched::Success {
            fired_keys: [selected].into_iter().collect(),
            output,
            alternatives,
        },
        Ok(ActionResult::Route { port, data }) => Dispatched::Success {
            fired_keys: [port].into_iter().collect(),
            output: data,
            alternatives: HashMap::new(),
        },
        Ok(ActionResult::MultiOutput {
            outputs,
            main_output,
        }) => {
            let fired_keys = outputs.keys().cloned().collect();
            let output = main_output.unwrap_or(serde_json::Value::Null);
            Dispatched::Success {
                fired_keys,
                output,
                alternatives: outputs,
            }
        }
        Ok(ActionResult::Break { output, .. }) => Dispatched::Success {
            fired_keys: [DEFAULT_OUTPUT_KEY.to_string()].into_iter().collect(),
            output,
            alternatives: HashMap::new(),
        },
        Ok(ActionResult::Continue { output, .. }) => Dispatched::Success {
            fired_keys: [DEFAULT_OUTPUT_KEY.to_string()].into_iter().collect(),
            output,
            alternatives: HashMap::new(),
        },
        Ok(ActionResult::Wait { condition, .. }) => Dispatched::Waiting { condition },
        Err(err) => Dispatched::Failed(err),
    }
}
