// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use anyhow::Result;
use ccvr_daemon::Config;

/// Load the config, fold in `--include`/`--exclude` overrides, and run the
/// daemon until a termination signal. Never returns on success.
pub async fn run(config_path: Option<PathBuf>, include: Vec<String>, exclude: Vec<String>) -> Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    config.apply_env_overrides();
    config.filter.include.extend(include);
    config.filter.exclude.extend(exclude);

    ccvr_daemon::lifecycle::run(config).await;
    Ok(())
}
