//! [`CoreError`]: the shared error type for everything below the
//! workflow/execution layer -- validation, lookup, permission, and
//! infrastructure failures that crates across the workspace need a common
//! vocabulary for.

use std::time::Duration;

use thiserror::Error;

use crate::id::UserId;

/// The shared core error vocabulary.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        value: Option<String>,
    },

    #[error("{resource_type} `{resource_id}` not found")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    #[error("{resource_type} `{resource_id}` already exists")]
    AlreadyExists {
        resource_type: String,
        resource_id: String,
    },

    #[error("permission denied for `{operation}` on `{resource}`: {reason}")]
    PermissionDenied {
        operation: String,
        resource: String,
        reason: String,
    },

    #[error("authentication failed: {reason}")]
    Authentication {
        reason: String,
        user_id: Option<UserId>,
    },

    #[error("authorization failed for `{operation}` on `{resource}`")]
    Authorization {
        operation: String,
        resource: String,
        user_id: Option<UserId>,
        tenant_id: Option<String>,
    },

    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        value: Option<String>,
    },

    #[error("serialization failed ({format}): {message}")]
    Serialization { message: String, format: String },

    #[error("deserialization failed ({format}): {message}")]
    Deserialization {
        message: String,
        format: String,
        data: Option<String>,
    },

    #[error("`{operation}` timed out after {duration:?}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    #[error("rate limit exceeded: {limit} per {period:?}")]
    RateLimitExceeded {
        limit: u64,
        period: Duration,
        retry_after: Option<Duration>,
    },

    #[error("resource exhausted: {resource} ({current}/{limit})")]
    ResourceExhausted {
        resource: String,
        limit: u64,
        current: u64,
    },

    #[error("internal error: {message}")]
    Internal {
        message: String,
        code: Option<String>,
    },

    #[error("service `{service}` unavailable: {reason}")]
    ServiceUnavailable {
        service: String,
        reason: String,
        retry_after: Option<Duration>,
    },

    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        file: Option<String>,
        line: Option<u32>,
    },

    #[error("invalid state for `{operation}`: expected `{expected_state}`, found `{current_state}`")]
    InvalidState {
        current_state: String,
        expected_state: String,
        operation: String,
    },

    #[error("dependency `{dependency}` failed during `{operation}`: {reason}")]
    Dependency {
        dependency: String,
        reason: String,
        operation: String,
    },

    #[error("network error during `{operation}`: {reason}")]
    Network {
        operation: String,
        reason: String,
        retryable: bool,
    },

    #[error("storage error ({backend}) during `{operation}`: {reason}")]
    Storage {
        operation: String,
        reason: String,
        backend: String,
    },

    #[error("workflow `{workflow_id}` execution `{execution_id}` failed at node `{node_id:?}`: {reason}")]
    WorkflowExecution {
        workflow_id: String,
        execution_id: String,
        node_id: Option<String>,
        reason: String,
    },

    #[error("node `{node_id}` execution `{execution_id}` failed: {reason}")]
    NodeExecution {
        node_id: String,
        execution_id: String,
        reason: String,
        retryable: bool,
    },

    #[error("expression `{expression}` failed to evaluate: {reason}")]
    ExpressionEvaluation {
        expression: String,
        reason: String,
        context: Option<String>,
    },

    #[error("resource management failed for `{resource_type}` during `{operation}`: {reason}")]
    ResourceManagement {
        operation: String,
        resource_type: String,
        reason: String,
    },

    #[error("cluster operation `{operation}` failed on node `{node_id:?}`: {reason}")]
    Cluster {
        operation: String,
        reason: String,
        node_id: Option<String>,
    },

    #[error("tenant `{tenant_id}` operation `{operation}` failed: {reason}")]
    Tenant {
        tenant_id: String,
        reason: String,
        operation: String,
    },
}

impl CoreError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. }
            | Self::RateLimitExceeded { .. }
            | Self::ServiceUnavailable { .. } => true,
            Self::Network { retryable, .. } | Self::NodeExecution { retryable, .. } => *retryable,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::AlreadyExists { .. }
                | Self::PermissionDenied { .. }
                | Self::Authentication { .. }
                | Self::Authorization { .. }
                | Self::InvalidInput { .. }
                | Self::InvalidState { .. }
        )
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND_ERROR",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS_ERROR",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED_ERROR",
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::Authorization { .. } => "AUTHORIZATION_ERROR",
            Self::InvalidInput { .. } => "INVALID_INPUT_ERROR",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::Deserialization { .. } => "DESERIALIZATION_ERROR",
            Self::Timeout { .. } => "TIMEOUT_ERROR",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_ERROR",
            Self::ResourceExhausted { .. } => "RESOURCE_EXHAUSTED_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
            Self::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::InvalidState { .. } => "INVALID_STATE_ERROR",
            Self::Dependency { .. } => "DEPENDENCY_ERROR",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::WorkflowExecution { .. } => "WORKFLOW_EXECUTION_ERROR",
            Self::NodeExecution { .. } => "NODE_EXECUTION_ERROR",
            Self::ExpressionEvaluation { .. } => "EXPRESSION_EVALUATION_ERROR",
            Self::ResourceManagement { .. } => "RESOURCE_MANAGEMENT_ERROR",
            Self::Cluster { .. } => "CLUSTER_ERROR",
            Self::Tenant { .. } => "TENANT_ERROR",
        }
    }

    /// A message safe to show an end user: no internal identifiers or
    /// stack-trace-adjacent detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::InvalidInput { message, .. } => {
                message.clone()
            }
            Self::NotFound {
                resource_type,
                resource_id,
            } => format!("{resource_type} `{resource_id}` was not found"),
            Self::PermissionDenied { .. } | Self::Authorization { .. } => {
                "you don't have permission to perform this action".to_string()
            }
            Self::Authentication { .. } => "authentication failed".to_string(),
            Self::Timeout { operation, .. } => format!("`{operation}` timed out, try again"),
            Self::RateLimitExceeded { .. } => "too many requests, slow down".to_string(),
            Self::ServiceUnavailable { service, .. } => {
                format!("{service} is temporarily unavailable")
            }
            _ => "an internal error occurred".to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            value: None,
        }
    }

    pub fn validation_with_details(
        message: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
            value: Some(value.into()),
        }
    }

    pub fn not_found(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    pub fn already_exists(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    pub fn permission_denied(
        operation: impl Into<String>,
        resource: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    pub fn authentication(reason: impl Into<String>, user_id: Option<UserId>) -> Self {
        Self::Authentication {
            reason: reason.into(),
            user_id,
        }
    }

    pub fn authorization(
        operation: impl Into<String>,
        resource: impl Into<String>,
        user_id: Option<UserId>,
        tenant_id: Option<String>,
    ) -> Self {
        Self::Authorization {
            operation: operation.into(),
            resource: resource.into(),
            user_id,
            tenant_id,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
            value: None,
        }
    }

    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn rate_limit_exceeded(limit: u64, period: Duration, retry_after: Option<Duration>) -> Self {
        Self::RateLimitExceeded {
            limit,
            period,
            retry_after,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            code: None,
        }
    }

    pub fn service_unavailable(
        service: impl Into<String>,
        reason: impl Into<String>,
        retry_after: Option<Duration>,
    ) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
            reason: reason.into(),
            retry_after,
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Extension trait for attaching extra context to a `Result`'s error.
pub trait ErrorContext<T> {
    fn context(self, message: impl Into<String>) -> CoreResult<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, message: impl Into<String>) -> CoreResult<T> {
        self.map_err(|e| CoreError::Internal {
            message: format!("{}: {e}", message.into()),
            code: None,
        })
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
            code: Some("IO_ERROR".to_string()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            format: "json".to_string(),
        }
    }
}

impl From<uuid::Error> for CoreError {
    fn from(err: uuid::Error) -> Self {
        Self::InvalidInput {
            message: err.to_string(),
            field: Some("id".to_string()),
            value: None,
        }
    }
}

impl From<chrono::ParseError> for CoreError {
    fn from(err: chrono::ParseError) -> Self {
        Self::InvalidInput {
            message: err.to_string(),
            field: Some("timestamp".to_string()),
            value: None,
        }
    }
}
