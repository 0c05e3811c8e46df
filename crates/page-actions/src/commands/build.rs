//! Setup, finalize and build commands.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::load_config;

/// Which lifecycle stages to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Mirror documents and write the config module
    Setup,
    /// Write llms.txt from the generated output
    Finalize,
    /// Both, in order
    All,
}

/// Run the requested stages.
pub fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    base_url: Option<String>,
    stage: Stage,
) -> Result<()> {
    let file_config = load_config(config_path)?;
    let builder = file_config.builder(output, base_url)?;

    match stage {
        Stage::Setup => {
            let result = builder.setup()?;
            tracing::info!(
                "Mirrored {} documents, wrote {} modules",
                result.documents,
                result.modules
            );
        }
        Stage::Finalize => {
            let result = builder.finalize()?;
            log_finalize(result.pages, &result.files);
        }
        Stage::All => {
            tracing::info!("Building page actions...");
            let result = builder.build()?;
            tracing::info!(
                "Mirrored {} documents, wrote {} modules",
                result.setup.documents,
                result.setup.modules
            );
            log_finalize(result.finalize.pages, &result.finalize.files);
            tracing::info!("Done in {}ms", result.duration_ms);
        }
    }

    tracing::info!("Output: {}", builder.output_dir().display());

    Ok(())
}

fn log_finalize(pages: usize, files: &[PathBuf]) {
    tracing::info!("Found {} generated pages", pages);
    for file in files {
        tracing::info!("Wrote {}", file.display());
    }
}
