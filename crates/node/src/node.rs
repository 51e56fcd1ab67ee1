//! The base Node trait.

use std::fmt::Debug;

use floe_core::NodeKey;

use crate::NodeComponents;
use crate::NodeMetadata;

/// Base trait for all node types in Floe.
///
/// A node represents a user-visible, versionable plugin unit (e.g. "Slack",
/// "HTTP Request"). It provides metadata and registers its runtime components
/// (actions, credentials) via [`NodeComponents`].
///
/// This trait is **object-safe** so nodes can be stored as `Arc<dyn Node>`.
pub trait Node: Send + Sync + Debug + 'static {
    /// Returns the static metadata for this node.
    fn metadata(&self) -> &NodeMetadata;

    /// Register actions and credential requirements into `components`.
    fn register(&self, components: &mut NodeComponents);

    /// The normalized, unique key identifying this node type.
    fn key(&self) -> &NodeKey {
        self.metadata().key()
    }

    /// Human-readable display name.
    fn name(&self) -> &str {
        self.metadata().name()
    }

    /// Version number (1-based).
    fn version(&self) -> u32 {
        self.metadata().version()
    }
}
