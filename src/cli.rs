// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skopos")]
#[command(about = "Image-push-driven redeploy watcher for Amazon ECS services")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new skopos.yml configuration file
    Init {
        /// Repository to watch
        #[arg(long)]
        repository: Option<String>,

        /// Image tag that triggers a redeploy
        #[arg(long)]
        tag: Option<String>,

        /// Cluster hosting the service
        #[arg(long)]
        cluster: Option<String>,

        /// Service to redeploy
        #[arg(long)]
        service: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Handle one image push event
    Handle {
        /// Path to the event JSON file; reads stdin when omitted
        #[arg(short, long)]
        event: Option<PathBuf>,
    },

    /// Show the watcher configuration
    Status,
}
