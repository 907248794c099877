//! Configuration loading

use std::path::Path;

use anyhow::{Context, Result};

use crate::Config;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "SUBTITLER_CONFIG_PATH";

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Pick the config file to load.
///
/// Search order:
/// 1. `explicit` (e.g. a `--config` flag), which must exist
/// 2. `SUBTITLER_CONFIG_PATH` environment variable, if the file exists
/// 3. ./config.yaml (current working directory)
/// 4. None: environment variables and defaults only
fn resolve_config_path(explicit: Option<&str>, from_env: Option<String>) -> Result<Option<String>> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        anyhow::ensure!(Path::new(path).exists(), "Config file not found: {path}");
        return Ok(Some(path.to_string()));
    }

    Ok(from_env
        .filter(|p| Path::new(p).exists())
        .or_else(|| Path::new(DEFAULT_CONFIG_PATH).exists().then(|| DEFAULT_CONFIG_PATH.to_string())))
}

/// Load configuration from a config file and environment variables.
///
/// Runs before logging is initialized, so progress goes to stderr.
/// Validation is left to the caller, which decides what is fatal.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    match resolve_config_path(explicit, std::env::var(CONFIG_PATH_ENV).ok())? {
        Some(path) => {
            eprintln!("Loading config from {path}");
            Config::from_file(&path).with_context(|| format!("Failed to load config from {path}"))
        }
        None => {
            eprintln!("No config file found, using environment variables");
            Config::from_env().context("Failed to load config from environment")
        }
    }
}
