// SPDX-License-Identifier: MIT

//! cc-voice-reporter — narrates AI coding assistant activity via a local
//! LLM and TTS.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cc-voice-reporter", version, about = "Narrates AI coding assistant activity by voice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start monitoring transcripts and hooks, narrating activity by voice
    Monitor {
        /// Only narrate projects whose display name matches this pattern (repeatable)
        #[arg(long = "include", value_name = "PATTERN")]
        include: Vec<String>,
        /// Never narrate projects whose display name matches this pattern (repeatable)
        #[arg(long = "exclude", value_name = "PATTERN")]
        exclude: Vec<String>,
        /// Path to a config file, overriding the default location
        #[arg(long = "config", value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Manage the configuration file
    Config(commands::config_cmd::ConfigArgs),
    /// Manage which projects are tracked
    Tracking(commands::tracking::TrackingArgs),
    /// Read one hook event from stdin and append it to the hook side-channel
    HookReceiver,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor { include, exclude, config } => commands::monitor::run(config, include, exclude).await,
        Commands::Config(args) => commands::config_cmd::run(args),
        Commands::Tracking(args) => commands::tracking::run(args),
        Commands::HookReceiver => commands::hook_receiver::run().await,
    }
}
