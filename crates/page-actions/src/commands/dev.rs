//! Development server command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use page_actions_server::{DevServer, DevServerConfig};

use crate::config::load_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, output: Option<PathBuf>, open: bool) -> Result<()> {
    let file_config = load_config(config_path)?;
    let builder = file_config.builder(output, None)?;

    tracing::info!("Starting development server on port {}", port);

    let config = DevServerConfig {
        content_dir: PathBuf::from(&file_config.docs.dir),
        extensions: file_config.docs.extensions.clone(),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config, builder).start().await?;

    Ok(())
}
