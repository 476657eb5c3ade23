// ABOUTME: Outcome of handling a single image push event.
// ABOUTME: Distinguishes a triggered redeploy from a filtered no-op.

use crate::types::ServiceId;

/// What the watcher did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentOutcome {
    /// A force-new-deployment command was issued for the service.
    Triggered { service: ServiceId },

    /// The event's tag did not match the target's expected tag. No side effect.
    Skipped,
}
