// ABOUTME: Error types for control plane operations.
// ABOUTME: Classifies failures as transient (retryable) or fatal.

use thiserror::Error;

/// Errors from control plane operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlPlaneError {
    #[error("cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("service not active: {0}")]
    ServiceNotActive(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request throttled: {0}")]
    Throttled(String),

    #[error("control plane unavailable: {0}")]
    Unavailable(String),

    #[error("request timed out after {0} seconds")]
    TimedOut(u64),

    #[error("control plane error: {0}")]
    Api(String),
}

impl ControlPlaneError {
    /// Whether the failure is worth an immediate retry. Throttling, temporary
    /// unavailability, and timeouts pass; authorization failures and unknown
    /// identifiers do not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ControlPlaneError::Throttled(_)
                | ControlPlaneError::Unavailable(_)
                | ControlPlaneError::TimedOut(_)
        )
    }
}
