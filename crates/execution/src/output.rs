//! Execution output types.
//!
//! [`ExecutionOutput`] is the materialized, persistence-ready form of action
//! output data. By the time data reaches this type, all `Deferred`/`Streaming`
//! variants have been resolved by the engine.
//!
//! [`NodeOutput`] wraps `ExecutionOutput` with execution metadata (status,
//! timing, size).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::node_state::NodeState;

/// Materialized output data for persistence and inter-node transport.
///
/// Small data is stored inline as JSON. Large data (exceeding the configured
/// size limit) is spilled to blob storage, and only a reference is kept.
///
/// This type only exists after the engine has resolved any `Deferred`,
/// `Streaming`, or `Collection` outputs from `ActionOutput`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutionOutput {
    /// Small data — stored inline as JSON value.
    Inline(serde_json::Value),

    /// Large data — stored in blob storage, referenced by key.
    BlobRef {
        /// Storage key for retrieving the blob.
        key: String,
        /// Size of the blob in bytes.
        size: u64,
        /// MIME type of the blob content.
        mime: String,
    },
}

impl ExecutionOutput {
    /// Create an inline output from a JSON value.
    pub fn inline(value: serde_json::Value) -> Self {
        Self::Inline(value)
    }

    /// Create a blob reference.
    pub fn blob(key: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self::BlobRef {
            key: key.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Returns `true` if this is an inline value.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }

    /// Returns `true` if this is a blob reference.
    pub fn is_blob_ref(&self) -> bool {
        matches!(self, Self::BlobRef { .. })
    }

    /// Extract the inline value, if present.
    pub fn as_inline(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Inline(v) => Some(v),
            Self::BlobRef { .. } => None,
        }
    }
}

/// A node's output data along with execution metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeOutput {
    /// The output data produced by the action.
    pub data: ExecutionOutput,
    /// The node state when this output was produced.
    pub status: NodeState,
    /// When this output was produced.
    pub produced_at: DateTime<Utc>,
    /// How long the node took to produce this output.
    #[serde(default, with = "crate::serde_duration_opt")]
    pub duration: Option<Duration>,
    /// Approximate size of the output in bytes.
    pub bytes: u64,
}

impl NodeOutput {
    /// Create an inline output.
    #[must_use]
    pub fn inline(value: serde_json::Value, status: NodeState, bytes: u64) -> Self {
        Self {
            data: ExecutionOutput::inline(value),
            status,
            produced_at: Utc::now(),
            duration: None,
            bytes,
        }
    }

    /// Create a blob reference output.
    #[must_use]
    pub fn blob_ref(
        key: impl Into<String>,
        size: u64,
        mime: impl Into<String>,
        status: NodeState,
    ) -> Self {
        Self {
            data: ExecutionOutput::blob(key, size, mime),
            status,
            produced_at: Utc::now(),
            duration: None,
            bytes: size,
        }
    }

    /// Returns `true` if the output data is inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.data.is_inline()
    }

    /// Returns `true` if the output data is a blob reference.
    #[must_use]
    pub fn is_blob_ref(&self) -> bool {
        self.data.is_blob_ref()
    }

    /// Extract the inline value, if present.
    #[must_use]
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        self.data.as_inline()
    }
}
