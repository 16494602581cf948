// SPDX-License-Identifier: MIT

use anyhow::{Result, bail};
use ccvr_daemon::Config;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Create a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
        /// Fail instead of prompting if the file already exists
        #[arg(long)]
        non_interactive: bool,
    },
    /// Print the path to the config file
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Init { force, non_interactive } => init(force, non_interactive),
        ConfigCommand::Path => path(),
    }
}

fn init(force: bool, non_interactive: bool) -> Result<()> {
    let path = Config::default_path()?;
    if path.exists() && !force {
        if non_interactive {
            bail!("config file already exists at {}; pass --force to overwrite", path.display());
        }
        bail!("config file already exists at {} (use --force to overwrite)", path.display());
    }
    Config::default().save(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn path() -> Result<()> {
    println!("{}", Config::default_path()?.display());
    Ok(())
}
