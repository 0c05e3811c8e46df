//! Build executor.
//!
//! Plays the host's role: runs every integration's setup hook, applies the
//! collected modules and copy directives, then discovers the generated pages
//! and hands them to the post-build hooks.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use page_actions_core::MirrorError;

use crate::copy::execute_copy;
use crate::integration::{BuildDone, BuildSetup, Integration, SiteSettings};
use crate::pages::discover_pages;

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to mirror document: {0}")]
    Mirror(#[from] MirrorError),

    #[error("Documents {first} and {second} both mirror to {dest}")]
    Collision {
        first: String,
        second: String,
        dest: String,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Result of the setup stage.
#[derive(Debug, Default)]
pub struct SetupResult {
    /// Number of documents mirrored
    pub documents: usize,

    /// Number of generated modules written
    pub modules: usize,
}

/// Result of the finalize stage.
#[derive(Debug, Default)]
pub struct FinalizeResult {
    /// Number of generated pages seen
    pub pages: usize,

    /// Files written by post-build hooks
    pub files: Vec<PathBuf>,
}

/// Result of a full build.
#[derive(Debug)]
pub struct BuildResult {
    pub setup: SetupResult,

    pub finalize: FinalizeResult,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Runs integrations against an output directory.
pub struct StaticBuilder {
    output_dir: PathBuf,
    site: SiteSettings,
    integrations: Vec<Box<dyn Integration>>,
}

impl StaticBuilder {
    /// Create a builder writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, site: SiteSettings) -> Self {
        Self {
            output_dir: output_dir.into(),
            site,
            integrations: Vec::new(),
        }
    }

    /// Register an integration. Hooks run in registration order.
    pub fn with_integration(mut self, integration: impl Integration + 'static) -> Self {
        self.integrations.push(Box::new(integration));
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Pre-build stage: write generated modules and execute copy directives.
    pub fn setup(&self) -> Result<SetupResult, BuildError> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let mut build_setup = BuildSetup::default();
        for integration in &self.integrations {
            tracing::debug!("Running setup hook for {}", integration.name());
            integration.config_setup(&mut build_setup)?;
        }

        let mut result = SetupResult::default();

        for module in &build_setup.modules {
            let path = self.output_dir.join(&module.path);
            write_atomic(&path, module.contents.as_bytes())?;
            tracing::debug!("Wrote module {} to {}", module.specifier, path.display());
            result.modules += 1;
        }

        for target in &build_setup.copies {
            let copied = execute_copy(target, &self.output_dir)?;
            tracing::info!(
                "Mirrored {} documents from {}",
                copied,
                target.src.display()
            );
            result.documents += copied;
        }

        Ok(result)
    }

    /// Post-build stage: discover generated pages and run post-build hooks.
    pub fn finalize(&self) -> Result<FinalizeResult, BuildError> {
        let pages = discover_pages(&self.output_dir)?;
        tracing::debug!("Found {} generated pages", pages.len());

        let done = BuildDone {
            dir: &self.output_dir,
            pages: &pages,
            site: &self.site,
        };

        let mut files = Vec::new();
        for integration in &self.integrations {
            tracing::debug!("Running build-done hook for {}", integration.name());
            files.extend(integration.build_done(&done)?);
        }

        Ok(FinalizeResult {
            pages: pages.len(),
            files,
        })
    }

    /// Run setup then finalize.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let setup = self.setup()?;
        let finalize = self.finalize()?;

        Ok(BuildResult {
            setup,
            finalize,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.output_dir.clone(),
        })
    }
}

/// Write `contents` to `path` through a temporary file in the same directory,
/// so readers never observe a partial file.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), BuildError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;

    let mut file = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| BuildError::WriteError(e.to_string()))?;
    file.write_all(contents)
        .map_err(|e| BuildError::WriteError(e.to_string()))?;
    file.persist(path)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))?;

    Ok(())
}
