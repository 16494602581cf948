// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use anyhow::Result;
use ccvr_daemon::Config;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct TrackingArgs {
    #[command(subcommand)]
    command: TrackingCommand,
}

#[derive(Subcommand)]
enum TrackingCommand {
    /// Start narrating activity for a project
    Add {
        /// Project directory, or a display-name pattern
        path: PathBuf,
    },
    /// Stop narrating activity for a project
    Remove {
        /// Project directory, or a display-name pattern
        path: PathBuf,
    },
    /// List tracked project patterns
    List,
}

pub fn run(args: TrackingArgs) -> Result<()> {
    match args.command {
        TrackingCommand::Add { path } => add(&path),
        TrackingCommand::Remove { path } => remove(&path),
        TrackingCommand::List => list(),
    }
}

fn pattern_for(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
}

fn load_or_default(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        Ok(Config::load(Some(config_path))?)
    } else {
        Ok(Config::default())
    }
}

fn add(path: &Path) -> Result<()> {
    let config_path = Config::default_path()?;
    let mut config = load_or_default(&config_path)?;
    let pattern = pattern_for(path);
    if !config.filter.include.iter().any(|existing| existing == &pattern) {
        config.filter.include.push(pattern);
    }
    config.save(&config_path)?;
    Ok(())
}

fn remove(path: &Path) -> Result<()> {
    let config_path = Config::default_path()?;
    let mut config = load_or_default(&config_path)?;
    let pattern = pattern_for(path);
    config.filter.include.retain(|existing| existing != &pattern);
    config.save(&config_path)?;
    Ok(())
}

fn list() -> Result<()> {
    let config = Config::load(None)?;
    if config.filter.include.is_empty() {
        println!("(tracking all projects; no include filter set)");
    } else {
        for pattern in &config.filter.include {
            println!("{pattern}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_for_a_directory_is_its_last_component() {
        assert_eq!(pattern_for(Path::new("/home/alice/my-app")), "my-app");
    }

    #[test]
    fn pattern_for_a_bare_name_is_itself() {
        assert_eq!(pattern_for(Path::new("my-app")), "my-app");
    }
}
