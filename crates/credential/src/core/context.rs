//! Credential operation context
//!
//! Provides request context for observability and audit logging.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ScopeId;

/// Request context for credential operations
///
/// Carries owner, scope, and tracing metadata for observability
/// and audit logging.
///
/// # Examples
///
/// ```
/// use floe_credential::CredentialContext;
///
/// // Basic context
/// let ctx = CredentialContext::new("user_123");
///
/// // With scope for multi-tenancy
/// let ctx = CredentialContext::new("user_123")
///     .with_scope("org:acme/team:eng").unwrap();
///
/// // With custom trace ID
/// use uuid::Uuid;
/// let trace_id = Uuid::new_v4();
/// let ctx = CredentialContext::new("user_123")
///     .with_trace_id(trace_id);
/// ```
#[derive(Debug, Clone)]
pub struct CredentialContext {
    /// Owner of the credential
    pub owner_id: String,

    /// Optional scope for isolation (multi-tenancy support)
    pub scope_id: Option<ScopeId>,

    /// Trace ID for distributed tracing
    pub trace_id: Uuid,

    /// Timestamp of the request
    pub timestamp: DateTime<Utc>,
}

impl CredentialContext {
    /// Create new context with owner
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            scope_id: None,
            trace_id: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }

    /// Set scope for this context (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the scope ID is invalid
    pub fn with_scope(
        mut self,
        scope_id: impl Into<String>,
    ) -> Result<Self, crate::core::ValidationError> {
        self.scope_id = Some(ScopeId::new(scope_id)?);
        Ok(self)
    }

    /// Set trace ID for this context (builder pattern)
    pub fn with_trace_id(mut self, trace_id: Uuid) -> Self {
        self.trace_id = trace_id;
        self
    }
}
