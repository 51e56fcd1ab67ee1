//! Shared behavioral traits implemented across the workspace's domain
//! types: scoping, execution context, identity, validation, and the small
//! conversion/formatting traits used by CLI and log output.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ExecutionId, NodeId, TenantId, UserId, WorkflowId};
use crate::scope::ScopeLevel;

/// Implemented by anything that lives at a [`ScopeLevel`].
pub trait Scoped {
    fn scope(&self) -> ScopeLevel;

    fn is_global(&self) -> bool {
        self.scope().is_global()
    }

    fn is_workflow_scoped(&self) -> bool {
        self.scope().is_workflow()
    }

    fn is_execution_scoped(&self) -> bool {
        self.scope().is_execution()
    }

    fn is_action_scoped(&self) -> bool {
        self.scope().is_action()
    }
}

/// Implemented by anything carrying the ambient identifiers of a running
/// workflow: execution, workflow, node, and (optionally) the acting user
/// and tenant.
pub trait HasContext {
    fn execution_id(&self) -> Option<ExecutionId>;
    fn workflow_id(&self) -> Option<WorkflowId>;
    fn node_id(&self) -> Option<NodeId>;
    fn user_id(&self) -> Option<UserId>;
    fn tenant_id(&self) -> Option<TenantId>;

    fn has_execution_context(&self) -> bool {
        self.execution_id().is_some()
    }

    fn has_workflow_context(&self) -> bool {
        self.workflow_id().is_some()
    }

    fn has_node_context(&self) -> bool {
        self.node_id().is_some()
    }

    fn has_user_context(&self) -> bool {
        self.user_id().is_some()
    }

    fn has_tenant_context(&self) -> bool {
        self.tenant_id().is_some()
    }
}

/// Implemented by anything with a stable identity and optional display
/// metadata.
pub trait Identifiable {
    type Id;

    fn id(&self) -> Self::Id;

    fn name(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn version(&self) -> Option<&str> {
        None
    }

    fn has_name(&self) -> bool {
        self.name().is_some()
    }

    fn has_description(&self) -> bool {
        self.description().is_some()
    }

    fn has_version(&self) -> bool {
        self.version().is_some()
    }
}

/// Implemented by anything that can validate its own invariants.
pub trait Validatable {
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;

    fn is_valid(&self) -> bool
    where
        Self::Error: Sized,
    {
        self.validate().is_ok()
    }
}

/// Cheap, explicit cloning -- distinguished from [`Clone`] where a type
/// wants to document that cloning is an intentional, non-trivial copy
/// rather than `derive(Clone)` boilerplate.
pub trait Cloneable: Clone {
    fn clone_deep(&self) -> Self {
        self.clone()
    }
}

impl<T: Clone> Cloneable for T {}

/// Order-independent equality/ordering helper for types that compare by a
/// projection rather than their full structural representation.
pub trait Comparable<Rhs = Self> {
    fn compare(&self, other: &Rhs) -> std::cmp::Ordering;

    fn is_equal(&self, other: &Rhs) -> bool {
        self.compare(other) == std::cmp::Ordering::Equal
    }
}

/// Implemented by types with a stable hash projection (distinct from
/// [`std::hash::Hash`] so callers can opt a type into content hashing
/// without pulling in `std::hash::Hash`'s trait bounds everywhere).
pub trait Hashable {
    fn content_hash(&self) -> u64;
}

/// Human-facing text rendering, distinct from [`std::fmt::Display`] so a
/// type can offer both a terse `Display` and a longer `display_verbose`.
pub trait Displayable: std::fmt::Display {
    fn display_verbose(&self) -> String {
        self.to_string()
    }
}

impl<T: std::fmt::Display> Displayable for T {}

/// Developer-facing text rendering beyond [`std::fmt::Debug`]'s derived
/// output.
pub trait Debuggable: std::fmt::Debug {
    fn debug_verbose(&self) -> String {
        format!("{self:?}")
    }
}

impl<T: std::fmt::Debug> Debuggable for T {}

/// Conversion to/from a canonical string form, for types whose `Display`
/// output round-trips through `FromStr`.
pub trait StringConvertible: Sized {
    fn to_canonical_string(&self) -> String;
    fn from_canonical_string(s: &str) -> Option<Self>;
}

/// Free-form metadata attached to an entity: creation/modification
/// timestamps, tags, and arbitrary key-value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub custom: HashMap<String, String>,
}

impl EntityMetadata {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            modified_at: now,
            tags: Vec::new(),
            custom: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_at = now;
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Implemented by entities that carry an [`EntityMetadata`] block.
pub trait HasMetadata {
    fn metadata(&self) -> &EntityMetadata;
    fn metadata_mut(&mut self) -> &mut EntityMetadata;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{ExecutionId, NodeId, WorkflowId};

    struct Ctx {
        execution_id: ExecutionId,
        workflow_id: WorkflowId,
        node_id: NodeId,
    }

    impl HasContext for Ctx {
        fn execution_id(&self) -> Option<ExecutionId> {
            Some(self.execution_id)
        }
        fn workflow_id(&self) -> Option<WorkflowId> {
            Some(self.workflow_id)
        }
        fn node_id(&self) -> Option<NodeId> {
            Some(self.node_id)
        }
        fn user_id(&self) -> Option<UserId> {
            None
        }
        fn tenant_id(&self) -> Option<TenantId> {
            None
        }
    }

    #[test]
    fn has_context_defaults_derive_from_accessors() {
        let ctx = Ctx {
            execution_id: ExecutionId::v4(),
            workflow_id: WorkflowId::v4(),
            node_id: NodeId::v4(),
        };
        assert!(ctx.has_execution_context());
        assert!(ctx.has_workflow_context());
        assert!(ctx.has_node_context());
        assert!(!ctx.has_user_context());
        assert!(!ctx.has_tenant_context());
    }

    struct Thing(WorkflowId);

    impl Identifiable for Thing {
        type Id = WorkflowId;

        fn id(&self) -> Self::Id {
            self.0
        }

        fn name(&self) -> Option<&str> {
            Some("thing")
        }
    }

    #[test]
    fn identifiable_defaults_are_overridable() {
        let thing = Thing(WorkflowId::v4());
        assert!(thing.has_name());
        assert!(!thing.has_description());
    }

    #[test]
    fn entity_metadata_tracks_tags_and_touch() {
        let now = Utc::now();
        let meta = EntityMetadata::new(now).with_tag("a").with_custom("k", "v");
        assert!(meta.has_tag("a"));
        assert_eq!(meta.custom.get("k"), Some(&"v".to_string()));
        assert_eq!(meta.created_at, meta.modified_at);
    }
}
