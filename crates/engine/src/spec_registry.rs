//! The Spec Registry: `(category, subtype) -> NodeSchema` lookup, config
//! validation, and default materialization.
//!
//! This is deliberately NOT built on `floe-node`'s `NodeRegistry`. That
//! registry indexes vendor integrations (`NodeKey`s like `"slack"` or
//! `"http_request"`, each carrying a `ParameterCollection` and credential
//! requirements) -- a catalog of *what third-party services a node can
//! call*. The spec registry here indexes the workflow's own literal type
//! axis, [`NodeCategory`] + subtype (e.g. `Action`/`"http_request"`,
//! `Flow`/`"if"`), and answers a narrower question: does this node type
//! exist, and is a given configuration valid for it. A vendor-integration
//! node and a spec-registry entry can share a subtype name without being
//! the same concept.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use floe_schema::{NodeSchema, SchemaError};
use floe_workflow::{NodeCategory, SpecLookup};
use indexmap::IndexMap;

/// One entry in the registry: a node type's full schema plus whether it is
/// a `FLOW` control node, which instead of declaring output keys up front
/// computes them at dispatch time (`IF`'s `true`/`false`, `SWITCH`'s case
/// labels).
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub category: NodeCategory,
    pub subtype: String,
    pub schema: NodeSchema,
}

impl NodeSpec {
    #[must_use]
    pub fn new(category: NodeCategory, subtype: impl Into<String>, schema: NodeSchema) -> Self {
        Self {
            category,
            subtype: subtype.into(),
            schema,
        }
    }

    fn output_keys(&self) -> HashSet<String> {
        self.schema.output.keys().cloned().collect()
    }
}

/// In-memory, read-only-after-build Spec Registry (spec §4.1, §5 "registry
/// is read-only and lock-free once built").
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    entries: HashMap<(NodeCategory, String), Arc<NodeSpec>>,
}

impl SpecRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type. Replaces any existing entry with the same
    /// `(category, subtype)`.
    pub fn register(&mut self, spec: NodeSpec) {
        let key = (spec.category, spec.subtype.clone());
        self.entries.insert(key, Arc::new(spec));
    }

    #[must_use]
    pub fn with(mut self, spec: NodeSpec) -> Self {
        self.register(spec);
        self
    }

    /// `Lookup(type, subtype) -> Spec`.
    #[must_use]
    pub fn lookup(&self, category: NodeCategory, subtype: &str) -> Option<Arc<NodeSpec>> {
        self.entries.get(&(category, subtype.to_string())).cloned()
    }

    /// `ListByType` -- every subtype registered under a category.
    #[must_use]
    pub fn list_by_type(&self, category: NodeCategory) -> Vec<Arc<NodeSpec>> {
        self.entries
            .iter()
            .filter(|((c, _), _)| *c == category)
            .map(|(_, spec)| spec.clone())
            .collect()
    }

    /// `List` -- every registered node type.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<NodeSpec>> {
        self.entries.values().cloned().collect()
    }

    /// `Materialize` -- apply schema defaults on top of a proposed
    /// configuration, returning the fully-resolved configuration a node
    /// would actually run with.
    #[must_use]
    pub fn materialize(
        &self,
        category: NodeCategory,
        subtype: &str,
        config: &IndexMap<String, serde_json::Value>,
    ) -> Option<IndexMap<String, serde_json::Value>> {
        let spec = self.lookup(category, subtype)?;
        let mut resolved = config.clone();
        for (key, field) in &spec.schema.configurations {
            if !resolved.contains_key(key) {
                if let Some(default) = &field.default {
                    resolved.insert(key.clone(), default.clone());
                }
            }
        }
        Some(resolved)
    }
}

impl SpecLookup for SpecRegistry {
    fn exists(&self, category: NodeCategory, subtype: &str) -> bool {
        self.lookup(category, subtype).is_some()
    }

    fn output_keys(&self, category: NodeCategory, subtype: &str) -> HashSet<String> {
        self.lookup(category, subtype)
            .map(|spec| spec.output_keys())
            .unwrap_or_default()
    }

    fn validate_config(
        &self,
        category: NodeCategory,
        subtype: &str,
        config: &IndexMap<String, serde_json::Value>,
    ) -> Vec<SchemaError> {
        match self.lookup(category, subtype) {
            Some(spec) => spec.schema.validate_config(config),
            None => Vec::new(),
        }
    }
}
