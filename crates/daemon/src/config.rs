// SPDX-License-Identifier: MIT

//! On-disk configuration: `$XDG_CONFIG_HOME/cc-voice-reporter/config.json`
//! (default `~/.config/...`). All fields optional; unknown keys are
//! rejected (spec §6).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_SUMMARY_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write config file {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid config at {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct Config {
    pub log_level: Option<String>,
    pub language: Option<String>,
    pub projects_dir: Option<PathBuf>,
    pub filter: FilterConfig,
    pub speaker: SpeakerConfig,
    pub ollama: OllamaConfig,
    pub summary: SummaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            language: None,
            projects_dir: None,
            filter: FilterConfig::default(),
            speaker: SpeakerConfig::default(),
            ollama: OllamaConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct FilterConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct SpeakerConfig {
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct OllamaConfig {
    pub model: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: None,
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            timeout_ms: DEFAULT_OLLAMA_TIMEOUT_MS,
        }
    }
}

impl OllamaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default, rename_all = "camelCase")]
pub struct SummaryConfig {
    pub interval_ms: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_SUMMARY_INTERVAL_MS,
        }
    }
}

impl SummaryConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Default config file path: `$XDG_CONFIG_HOME/cc-voice-reporter/config.json`,
    /// falling back to `~/.config/cc-voice-reporter/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("cc-voice-reporter").join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or the default path if absent. A missing file at
    /// the default path is not an error: it yields `Config::default()`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let contents = match std::fs::read_to_string(&resolved) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && path.is_none() => {
                return Ok(Config::default());
            }
            Err(err) => {
                return Err(ConfigError::Read { path: resolved, source: err });
            }
        };

        serde_json::from_str(&contents).map_err(|err| ConfigError::Parse { path: resolved, source: err })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        // Config is plain structs/Options/Strings, never a map with non-string
        // keys or other shape serde_json::to_string_pretty can choke on.
        #[allow(clippy::expect_used)]
        let json = serde_json::to_string_pretty(self).expect("Config serializes");
        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply the `CC_VOICE_REPORTER_LOG_LEVEL` env override, which trumps
    /// the file's `logLevel` (spec §6).
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("CC_VOICE_REPORTER_LOG_LEVEL") {
            self.log_level = Some(level);
        }
    }
}

/// A pattern matches if it is an exact match of, a suffix of, or appears as
/// a substring of `display_name` (spec §7).
fn pattern_matches(display_name: &str, pattern: &str) -> bool {
    display_name == pattern || display_name.ends_with(pattern) || display_name.contains(pattern)
}

/// Filter semantics: exclude overrides include; empty lists allow all.
pub fn project_allowed(display_name: &str, filter: &FilterConfig) -> bool {
    if filter.exclude.iter().any(|pattern| pattern_matches(display_name, pattern)) {
        return false;
    }
    if filter.include.is_empty() {
        return true;
    }
    filter.include.iter().any(|pattern| pattern_matches(display_name, pattern))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
