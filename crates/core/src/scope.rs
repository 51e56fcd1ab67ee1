//! Scope hierarchy: `Global > Organization > Project > Workflow > Execution
//! > Action`. A scope identifies where a piece of state, a credential
//! grant, or a permission check lives in that hierarchy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{ExecutionId, NodeId, OrganizationId, ProjectId, WorkflowId};

/// A level in the scope hierarchy, carrying the identifiers that pin it to
/// a concrete resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum ScopeLevel {
    Global,
    Organization(OrganizationId),
    Project(ProjectId),
    Workflow(WorkflowId),
    Execution(ExecutionId),
    Action(ExecutionId, NodeId),
}

/// A child scope type, used to derive a narrower scope from a broader one
/// via [`ScopeLevel::child`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildScopeType {
    Organization(OrganizationId),
    Project(ProjectId),
    Workflow(WorkflowId),
    Execution(ExecutionId),
    Action(ExecutionId, NodeId),
}

impl ScopeLevel {
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    #[must_use]
    pub fn is_organization(&self) -> bool {
        matches!(self, Self::Organization(_))
    }

    #[must_use]
    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project(_))
    }

    #[must_use]
    pub fn is_workflow(&self) -> bool {
        matches!(self, Self::Workflow(_))
    }

    #[must_use]
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action(_, _))
    }

    #[must_use]
    pub fn organization_id(&self) -> Option<OrganizationId> {
        match self {
            Self::Organization(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Self::Project(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn workflow_id(&self) -> Option<WorkflowId> {
        match self {
            Self::Workflow(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn execution_id(&self) -> Option<ExecutionId> {
        match self {
            Self::Execution(id) | Self::Action(id, _) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Action(_, id) => Some(*id),
            _ => None,
        }
    }

    /// A scope's depth in the hierarchy: `Global` is shallowest, `Action`
    /// is deepest.
    fn depth(&self) -> u8 {
        match self {
            Self::Global => 0,
            Self::Organization(_) => 1,
            Self::Project(_) => 2,
            Self::Workflow(_) => 3,
            Self::Execution(_) => 4,
            Self::Action(_, _) => 5,
        }
    }

    /// Whether `self` is contained in (at or below) `other` in the
    /// hierarchy. `Global` contains everything; an `Action` scope is
    /// contained only in itself, its `Execution`, and anything above.
    #[must_use]
    pub fn is_contained_in(&self, other: &ScopeLevel) -> bool {
        if other.is_global() {
            return true;
        }
        match (self, other) {
            (a, b) if a == b => true,
            (Self::Action(exec, _), Self::Execution(other_exec)) => exec == other_exec,
            _ => false,
        }
    }

    /// The parent scope one level up, or `None` if already `Global`.
    #[must_use]
    pub fn parent(&self) -> Option<ScopeLevel> {
        match self {
            Self::Global => None,
            Self::Organization(_) => Some(Self::Global),
            Self::Project(_) => Some(Self::Global),
            Self::Workflow(_) => Some(Self::Global),
            Self::Execution(_) => Some(Self::Global),
            Self::Action(exec, _) => Some(Self::Execution(*exec)),
        }
    }

    /// Derive a narrower scope from this one.
    #[must_use]
    pub fn child(&self, child: ChildScopeType) -> ScopeLevel {
        match child {
            ChildScopeType::Organization(id) => Self::Organization(id),
            ChildScopeType::Project(id) => Self::Project(id),
            ChildScopeType::Workflow(id) => Self::Workflow(id),
            ChildScopeType::Execution(id) => Self::Execution(id),
            ChildScopeType::Action(exec, node) => Self::Action(exec, node),
        }
    }
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Organization(id) => write!(f, "organization:{id}"),
            Self::Project(id) => write!(f, "project:{id}"),
            Self::Workflow(id) => write!(f, "workflow:{id}"),
            Self::Execution(id) => write!(f, "execution:{id}"),
            Self::Action(exec, node) => write!(f, "action:{exec}:{node}"),
        }
    }
}

/// An identifier paired with the scope it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopedId {
    pub scope: ScopeLevel,
    pub id: String,
}

impl ScopedId {
    #[must_use]
    pub fn new(scope: ScopeLevel, id: impl Into<String>) -> Self {
        Self {
            scope,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn global(id: impl Into<String>) -> Self {
        Self::new(ScopeLevel::Global, id)
    }

    #[must_use]
    pub fn workflow(workflow_id: WorkflowId, id: impl Into<String>) -> Self {
        Self::new(ScopeLevel::Workflow(workflow_id), id)
    }

    #[must_use]
    pub fn execution(execution_id: ExecutionId, id: impl Into<String>) -> Self {
        Self::new(ScopeLevel::Execution(execution_id), id)
    }

    #[must_use]
    pub fn action(execution_id: ExecutionId, node_id: NodeId, id: impl Into<String>) -> Self {
        Self::new(ScopeLevel::Action(execution_id, node_id), id)
    }

    /// Whether this id's scope is contained in `scope`.
    #[must_use]
    pub fn is_in_scope(&self, scope: &ScopeLevel) -> bool {
        self.scope.is_contained_in(scope)
    }
}
