// ABOUTME: Control plane trait for container orchestration systems.
// ABOUTME: Exposes the single mutating operation the watcher issues.

use super::error::ControlPlaneError;
use crate::types::{ClusterId, ServiceId};
use async_trait::async_trait;

/// Management-plane operations on a container orchestration system.
///
/// The only mutating call the watcher makes. Forcing a new deployment against
/// an already-current service is a no-op at the control-plane level, so the
/// operation is safe to repeat under at-least-once event delivery.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Replace the service's running tasks with fresh ones pulling the
    /// current image, without changing the service's declared configuration.
    async fn force_new_deployment(
        &self,
        cluster: &ClusterId,
        service: &ServiceId,
    ) -> Result<(), ControlPlaneError>;
}
