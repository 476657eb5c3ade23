// ABOUTME: Serverless entrypoint running the watcher under lambda_runtime.
// ABOUTME: Receives event-bus envelopes and forces deployments on tag match.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde::Serialize;
use skopos::config::Config;
use skopos::event::EventEnvelope;
use skopos::plane::EcsControlPlane;
use skopos::watcher::{DeploymentOutcome, dispatch_event};
use tracing::{debug, info};

#[derive(Serialize)]
struct Response {
    triggered: Vec<String>,
    skipped: usize,
}

async fn function_handler(
    config: &Config,
    plane: &EcsControlPlane,
    event: LambdaEvent<EventEnvelope>,
) -> Result<Response, Error> {
    let Some(published) = event.payload.image_published() else {
        debug!("not a successful image push, ignoring");
        return Ok(Response {
            triggered: Vec::new(),
            skipped: 0,
        });
    };

    let outcomes = dispatch_event(plane, &published, config).await?;

    let mut triggered = Vec::new();
    let mut skipped = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(DeploymentOutcome::Triggered { service }) => triggered.push(service.to_string()),
            Ok(DeploymentOutcome::Skipped) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        repository = %published.repository,
        tag = %published.tag,
        triggered = triggered.len(),
        skipped,
        "event handled"
    );

    Ok(Response { triggered, skipped })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let plane = EcsControlPlane::from_env(config.region.as_deref()).await;

    let config = &config;
    let plane = &plane;
    run(service_fn(move |event| async move {
        function_handler(config, plane, event).await
    }))
    .await
}
