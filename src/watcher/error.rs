// ABOUTME: Watcher error types with SNAFU pattern.
// ABOUTME: Classifies failures into validation, transient, and fatal kinds.

use snafu::Snafu;

use crate::plane::ControlPlaneError;

/// Errors from handling an image push event.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum WatcherError {
    #[snafu(display("invalid event: {reason}"))]
    InvalidEvent { reason: String },

    #[snafu(display("redeploy failed after {attempts} attempt(s): {source}"))]
    ControlPlane {
        source: ControlPlaneError,
        attempts: u32,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherErrorKind {
    /// Malformed event; never retried, no side effects were made.
    Validation,
    /// Transient control plane failure that exhausted its retry budget.
    Transient,
    /// Control plane rejected the request; retrying cannot help.
    Fatal,
}

impl WatcherError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> WatcherErrorKind {
        match self {
            WatcherError::InvalidEvent { .. } => WatcherErrorKind::Validation,
            WatcherError::ControlPlane { source, .. } => {
                if source.is_transient() {
                    WatcherErrorKind::Transient
                } else {
                    WatcherErrorKind::Fatal
                }
            }
        }
    }

    /// Returns the control plane failure if that is what ended the invocation.
    pub fn control_plane_details(&self) -> Option<&ControlPlaneError> {
        match self {
            WatcherError::ControlPlane { source, .. } => Some(source),
            _ => None,
        }
    }
}
