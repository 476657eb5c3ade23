// ABOUTME: Deployment trigger watcher bridging push events to redeploys.
// ABOUTME: Exports the handler operation, outcomes, and classified errors.

mod backoff;
mod error;
mod handler;
mod outcome;

pub use error::{WatcherError, WatcherErrorKind};
pub use handler::{TargetOutcome, dispatch_event, handle_image_published};
pub use outcome::DeploymentOutcome;
