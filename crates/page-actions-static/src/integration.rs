//! Build lifecycle hooks.
//!
//! An [`Integration`] registers work at two points of a build: before pages
//! are generated ([`Integration::config_setup`]) and after the output is
//! final ([`Integration::build_done`]). [`PageActions`] is the integration
//! that mirrors documents and writes `llms.txt`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use page_actions_core::{
    render_manifest, ContentDocument, GeneratedPage, MirrorError, NavNode, PluginConfig,
    MANIFEST_FILE_NAME,
};

use crate::builder::{write_atomic, BuildError};
use crate::copy::{CopyTarget, RenameFn};

/// Specifier client code uses to import the plugin configuration.
pub const CONFIG_MODULE_SPECIFIER: &str = "virtual:page-actions/config";

/// Default location of the generated config module, relative to the output root.
pub const DEFAULT_MODULE_PATH: &str = "_page-actions/config.js";

/// Document extensions mirrored by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// A source file generated at build time and importable by client code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Specifier the module stands in for
    pub specifier: String,

    /// Path relative to the output directory
    pub path: PathBuf,

    /// Module source
    pub contents: String,
}

/// Mutable build configuration handed to setup hooks.
#[derive(Debug, Default)]
pub struct BuildSetup {
    pub modules: Vec<GeneratedModule>,
    pub copies: Vec<CopyTarget>,
}

/// Resolved site settings from the surrounding framework.
#[derive(Debug, Clone, Default)]
pub struct SiteSettings {
    /// Site title
    pub title: String,

    /// Navigation tree, if one is configured
    pub sidebar: Option<Vec<NavNode>>,
}

/// State handed to post-build hooks.
#[derive(Debug, Clone, Copy)]
pub struct BuildDone<'a> {
    /// Output directory
    pub dir: &'a Path,

    /// Pages generated by the build
    pub pages: &'a [GeneratedPage],

    /// Resolved site settings
    pub site: &'a SiteSettings,
}

/// A build integration.
pub trait Integration: Send + Sync {
    /// Integration identifier
    fn name(&self) -> &'static str;

    /// Register modules and copy directives before the build.
    fn config_setup(&self, setup: &mut BuildSetup) -> Result<(), BuildError>;

    /// Finalize the output. Returns the files written.
    fn build_done(&self, done: &BuildDone<'_>) -> Result<Vec<PathBuf>, BuildError>;
}

/// Mirrors content documents as raw markdown and writes `llms.txt`.
#[derive(Debug, Clone)]
pub struct PageActions {
    config: Arc<PluginConfig>,
    content_dir: PathBuf,
    extensions: Vec<String>,
    module_path: PathBuf,
}

impl PageActions {
    /// Create the integration for documents under `content_dir`.
    pub fn new(config: Arc<PluginConfig>, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            module_path: PathBuf::from(DEFAULT_MODULE_PATH),
        }
    }

    /// Override the mirrored document extensions.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Override where the config module is written.
    pub fn with_module_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.module_path = path.into();
        self
    }

    pub fn config(&self) -> &Arc<PluginConfig> {
        &self.config
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Rename hook mapping a content document to its mirror path.
    pub fn rename_fn(&self) -> RenameFn {
        let root = self.content_dir.to_string_lossy().into_owned();

        Arc::new(
            move |file_name: &str, extension: &str, full_path: &Path| -> Result<PathBuf, MirrorError> {
                let doc = ContentDocument::from_host(file_name, extension, full_path, &root)?;
                Ok(PathBuf::from(doc.mirrored_path()))
            },
        )
    }

    /// Source of the generated config module.
    pub fn config_module(&self) -> Result<GeneratedModule, BuildError> {
        let json = self
            .config
            .to_json()
            .map_err(|e| BuildError::ConfigError(e.to_string()))?;

        Ok(GeneratedModule {
            specifier: CONFIG_MODULE_SPECIFIER.to_string(),
            path: self.module_path.clone(),
            contents: format!("// Generated by page-actions. Do not edit.\nexport default {json};\n"),
        })
    }
}

impl Integration for PageActions {
    fn name(&self) -> &'static str {
        "page-actions"
    }

    fn config_setup(&self, setup: &mut BuildSetup) -> Result<(), BuildError> {
        setup.modules.push(self.config_module()?);
        setup.copies.push(CopyTarget {
            src: self.content_dir.clone(),
            extensions: self.extensions.clone(),
            dest: PathBuf::new(),
            rename: self.rename_fn(),
        });

        Ok(())
    }

    fn build_done(&self, done: &BuildDone<'_>) -> Result<Vec<PathBuf>, BuildError> {
        let manifest_path = done.dir.join(MANIFEST_FILE_NAME);

        let Some(manifest) = render_manifest(
            &self.config,
            &done.site.title,
            done.site.sidebar.as_deref(),
            done.pages,
        ) else {
            tracing::info!("No base URL configured, skipping {}", MANIFEST_FILE_NAME);
            if manifest_path.exists() {
                fs::remove_file(&manifest_path)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::debug!("Removed stale {}", manifest_path.display());
            }
            return Ok(Vec::new());
        };

        if !matches!(&done.site.sidebar, Some(nodes) if !nodes.is_empty()) {
            tracing::debug!("No sidebar configured, listing {} generated pages", done.pages.len());
        }

        write_atomic(&manifest_path, manifest.as_bytes())?;
        tracing::info!("Wrote {}", manifest_path.display());

        Ok(vec![manifest_path])
    }
}
