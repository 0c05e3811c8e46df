//! Preview a finished build with its markdown mirrors.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use page_actions_core::MANIFEST_FILE_NAME;
use page_actions_server::serve_dir;
use page_actions_static::DEFAULT_MODULE_PATH;

use crate::config::load_config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: PathBuf, open: bool) -> Result<()> {
    let file_config = load_config(config_path)?;
    let module_path = file_config
        .page_actions
        .config_module
        .as_deref()
        .unwrap_or(DEFAULT_MODULE_PATH);

    check_output(&dir, Path::new(module_path))?;

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    serve_dir(addr, &dir, open).await?;

    Ok(())
}

/// Refuse directories page-actions has not processed.
fn check_output(dir: &Path, module_path: &Path) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'page-actions build' first.",
            dir.display()
        );
    }

    if !dir.join(module_path).exists() {
        anyhow::bail!(
            "{} has no page-actions output. Run 'page-actions build' first.",
            dir.display()
        );
    }

    if dir.join(MANIFEST_FILE_NAME).exists() {
        tracing::info!("Serving {} with {}", dir.display(), MANIFEST_FILE_NAME);
    } else {
        tracing::warn!(
            "No {} in {}. Set page_actions.base_url to generate one.",
            MANIFEST_FILE_NAME,
            dir.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rejects_missing_directory() {
        let temp = tempdir().unwrap();

        let result = check_output(&temp.path().join("dist"), Path::new(DEFAULT_MODULE_PATH));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_unprocessed_output() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.html"), "").unwrap();

        let result = check_output(temp.path(), Path::new(DEFAULT_MODULE_PATH));

        assert!(result.is_err());
    }

    #[test]
    fn accepts_output_with_config_module() {
        let temp = tempdir().unwrap();
        let module = temp.path().join(DEFAULT_MODULE_PATH);
        fs::create_dir_all(module.parent().unwrap()).unwrap();
        fs::write(&module, "export default {};\n").unwrap();

        assert!(check_output(temp.path(), Path::new(DEFAULT_MODULE_PATH)).is_ok());
    }
}
