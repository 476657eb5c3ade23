// ABOUTME: Core watcher operation bridging a push event to a redeploy command.
// ABOUTME: Filters on tag, fans out to matching targets, retries transient failures.

use futures::future::join_all;
use snafu::ResultExt;
use tracing::{debug, info, warn};

use super::backoff::backoff_delay;
use super::error::{ControlPlaneSnafu, InvalidEventSnafu, WatcherError};
use super::outcome::DeploymentOutcome;
use crate::config::{Config, DeploymentTarget, RetryConfig};
use crate::event::ImagePublishedEvent;
use crate::plane::{ControlPlane, ControlPlaneError};

/// Per-target result of dispatching one event.
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: DeploymentTarget,
    pub result: Result<DeploymentOutcome, WatcherError>,
}

/// Handle one push event against one deployment target.
///
/// Issues at most one mutating control plane call per successful invocation.
/// A redundant force-new-deployment against an already-current service is a
/// no-op at the control plane, so repeat deliveries of the same event are
/// safe; the watcher keeps no state between invocations and does not
/// deduplicate.
pub async fn handle_image_published<P: ControlPlane + ?Sized>(
    plane: &P,
    event: &ImagePublishedEvent,
    target: &DeploymentTarget,
    retry: &RetryConfig,
) -> Result<DeploymentOutcome, WatcherError> {
    validate_event(event)?;

    // Exact-match, case-sensitive.
    if !target.tag.matches(&event.tag) {
        debug!(
            repository = %event.repository,
            pushed = %event.tag,
            expected = %target.tag,
            "tag mismatch, skipping"
        );
        return Ok(DeploymentOutcome::Skipped);
    }

    let mut attempt = 0u32;
    loop {
        attempt += 1;

        let call = plane.force_new_deployment(&target.cluster, &target.service);
        let result = match tokio::time::timeout(retry.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ControlPlaneError::TimedOut(retry.call_timeout.as_secs())),
        };

        match result {
            Ok(()) => {
                info!(
                    cluster = %target.cluster,
                    service = %target.service,
                    tag = %event.tag,
                    "forced new deployment"
                );
                return Ok(DeploymentOutcome::Triggered {
                    service: target.service.clone(),
                });
            }
            Err(e) if e.is_transient() && attempt <= retry.retries => {
                let delay = backoff_delay(retry.base_delay, attempt);
                warn!(
                    cluster = %target.cluster,
                    service = %target.service,
                    error = %e,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "transient control plane failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(e).context(ControlPlaneSnafu { attempts: attempt });
            }
        }
    }
}

/// Dispatch one event to every configured target watching its repository.
///
/// Targets are handled concurrently and independently; one target's failure
/// does not block another's outcome. An event for a repository no target
/// watches is not an error.
pub async fn dispatch_event<P: ControlPlane + ?Sized>(
    plane: &P,
    event: &ImagePublishedEvent,
    config: &Config,
) -> Result<Vec<TargetOutcome>, WatcherError> {
    validate_event(event)?;

    let targets = config.targets_for(&event.repository);
    if targets.is_empty() {
        debug!(repository = %event.repository, "no matching deployment target");
        return Ok(Vec::new());
    }

    let outcomes = join_all(targets.into_iter().map(|target| async move {
        let result = handle_image_published(plane, event, target, &config.retry).await;
        TargetOutcome {
            target: target.clone(),
            result,
        }
    }))
    .await;

    Ok(outcomes)
}

fn validate_event(event: &ImagePublishedEvent) -> Result<(), WatcherError> {
    if event.repository.is_empty() {
        return InvalidEventSnafu {
            reason: "empty repository identifier",
        }
        .fail();
    }

    if event.tag.is_empty() {
        return InvalidEventSnafu {
            reason: "empty image tag",
        }
        .fail();
    }

    Ok(())
}
