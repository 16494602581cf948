// SPDX-License-Identifier: MIT

//! Filesystem layout for the daemon's runtime files (spec §6): state
//! directory resolution, the hooks side-channel directory, the lock file,
//! and the log file.

use std::path::PathBuf;

use crate::lifecycle::LifecycleError;

const STATE_DIR_ENV: &str = "CC_VOICE_REPORTER_STATE_DIR";
const STATE_DIR_XDG_ENV: &str = "XDG_STATE_HOME";
const APP_DIR_NAME: &str = "cc-voice-reporter";

/// Resolved runtime paths, rooted at the state directory.
#[derive(Debug, Clone)]
pub struct Paths {
    pub state_dir: PathBuf,
    pub lock_path: PathBuf,
    pub log_path: PathBuf,
    pub hooks_dir: PathBuf,
}

impl Paths {
    /// Resolve the state directory:
    /// `CC_VOICE_REPORTER_STATE_DIR` > `XDG_STATE_HOME/cc-voice-reporter` >
    /// `~/.local/state/cc-voice-reporter`.
    pub fn resolve() -> Result<Self, LifecycleError> {
        let state_dir = state_dir()?;
        Ok(Self {
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
            hooks_dir: state_dir.join("hooks"),
            state_dir,
        })
    }

    /// Default transcript root: `~/.claude/projects`.
    pub fn default_projects_dir() -> Result<PathBuf, LifecycleError> {
        let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
        Ok(home.join(".claude").join("projects"))
    }
}

fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var(STATE_DIR_XDG_ENV) {
        return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
    Ok(home.join(".local").join("state").join(APP_DIR_NAME))
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
