//! Print the resolved client configuration.

use std::path::Path;

use anyhow::{Context, Result};
use page_actions_static::CONFIG_MODULE_SPECIFIER;

use crate::config::load_config;

/// Run the config command.
pub fn run(config_path: &Path) -> Result<()> {
    let file_config = load_config(config_path)?;
    let config = file_config.plugin_config(None);

    let json = config.to_json().context("Failed to serialize config")?;

    tracing::debug!("Config exposed as {}", CONFIG_MODULE_SPECIFIER);
    println!("{json}");

    Ok(())
}
