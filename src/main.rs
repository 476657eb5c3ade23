// ABOUTME: Entry point for the skopos CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use skopos::config::{self, Config};
use skopos::error::{Error, Result};
use skopos::event::ImagePublishedEvent;
use skopos::plane::EcsControlPlane;
use skopos::watcher::{DeploymentOutcome, dispatch_event};
use std::env;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init {
            repository,
            tag,
            cluster,
            service,
            force,
        } => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            config::init_config(
                &cwd,
                repository.as_deref(),
                tag.as_deref(),
                cluster.as_deref(),
                service.as_deref(),
                force,
            )
        }
        Commands::Handle { event } => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            let config = Config::discover(&cwd)?;
            let event = read_event(event)?;

            handle_event(config, event).await
        }
        Commands::Status => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            Config::discover(&cwd).map(|config| {
                println!("Targets: {}", config.targets.len());
                for target in &config.targets {
                    println!(
                        "  {}:{} -> {}/{}",
                        target.repository, target.tag, target.cluster, target.service
                    );
                }
                println!(
                    "Retries: {} (base delay {:?}, call timeout {:?})",
                    config.retry.retries, config.retry.base_delay, config.retry.call_timeout
                );
            })
        }
    }
}

/// Read the event JSON from a file or stdin.
fn read_event(path: Option<PathBuf>) -> Result<ImagePublishedEvent> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    Ok(ImagePublishedEvent::from_json(&input)?)
}

/// Dispatch one event against all configured targets.
async fn handle_event(config: Config, event: ImagePublishedEvent) -> Result<()> {
    println!("Handling push of {}:{}", event.repository, event.tag);

    // Don't touch the network for events no target watches.
    if config.targets_for(&event.repository).is_empty() {
        println!("  → No target watches repository {}", event.repository);
        return Ok(());
    }

    println!("  → Connecting to control plane...");
    let plane = EcsControlPlane::from_env(config.region.as_deref()).await;

    let outcomes = dispatch_event(&plane, &event, &config)
        .await
        .map_err(|e| Error::Watcher(e.to_string()))?;

    let mut failed = false;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(DeploymentOutcome::Triggered { service }) => {
                println!("  ✓ Triggered new deployment of {}", service);
            }
            Ok(DeploymentOutcome::Skipped) => {
                println!(
                    "  → Skipped {}/{} (expects tag {})",
                    outcome.target.cluster, outcome.target.service, outcome.target.tag
                );
            }
            Err(e) => {
                failed = true;
                eprintln!(
                    "  ✗ {}/{}: {}",
                    outcome.target.cluster, outcome.target.service, e
                );
            }
        }
    }

    if failed {
        return Err(Error::Watcher("one or more targets failed".to_string()));
    }

    Ok(())
}
