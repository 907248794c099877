//! Providers manager initialization

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::{extract::PatternSet, service::ProvidersManager, Config};

/// Compile the extraction patterns and build every configured provider.
pub fn init_manager(config: &Config) -> Result<ProvidersManager> {
    let patterns = PatternSet::with_extra_groups(&config.extraction.extra_groups)
        .context("Failed to compile extraction patterns")?;
    if !config.extraction.extra_groups.is_empty() {
        info!(count = config.extraction.extra_groups.len(), "Extra release groups registered");
    }

    let manager = ProvidersManager::from_config(config, Arc::new(patterns))
        .context("Failed to initialize subtitle providers")?;

    for status in manager.providers() {
        info!(provider = %status.name, enabled = status.enabled, "Subtitle provider ready");
    }

    Ok(manager)
}
