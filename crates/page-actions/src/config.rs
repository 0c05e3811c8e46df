//! Configuration file structure (docs.toml).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use page_actions_core::{parse_sidebar, NavNode, PageActionsOptions, PluginConfig};
use page_actions_static::{PageActions, SiteSettings, StaticBuilder, DEFAULT_EXTENSIONS};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub page_actions: PageActionsSection,
    /// Directory holding the config file; relative file references resolve here
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_content_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Inline navigation tree
    pub sidebar: Option<toml::Value>,
    /// Navigation tree in a separate `.json`, `.yaml` or `.yml` file
    pub sidebar_file: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            output: default_output(),
            title: default_title(),
            extensions: default_extensions(),
            sidebar: None,
            sidebar_file: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct PageActionsSection {
    #[serde(flatten)]
    pub options: PageActionsOptions,
    /// Where the generated config module is written, relative to the output
    pub config_module: Option<String>,
}

fn default_content_dir() -> String {
    "src/content/docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

impl ConfigFile {
    /// Resolve the plugin configuration, letting `base_url` override the file.
    pub fn plugin_config(&self, base_url: Option<String>) -> PluginConfig {
        let mut options = self.page_actions.options.clone();
        if base_url.is_some() {
            options.base_url = base_url;
        }
        PluginConfig::resolve(options)
    }

    /// Read the navigation tree, if one is configured.
    ///
    /// A sidebar that is not an array is ignored so the manifest falls back
    /// to the generated page list.
    pub fn sidebar(&self) -> Result<Option<Vec<NavNode>>> {
        let value = match (&self.docs.sidebar_file, &self.docs.sidebar) {
            (Some(file), inline) => {
                if inline.is_some() {
                    tracing::warn!("Both sidebar and sidebar_file are set, using {}", file);
                }
                read_sidebar_file(&self.root.join(file))?
            }
            (None, Some(inline)) => {
                serde_json::to_value(inline).context("Failed to convert inline sidebar")?
            }
            (None, None) => return Ok(None),
        };

        match parse_sidebar(&value) {
            Ok(nodes) => Ok(Some(nodes)),
            Err(e) => {
                tracing::debug!("Ignoring sidebar: {}", e);
                Ok(None)
            }
        }
    }

    pub fn site_settings(&self) -> Result<SiteSettings> {
        Ok(SiteSettings {
            title: self.docs.title.clone(),
            sidebar: self.sidebar()?,
        })
    }

    /// Build the page actions integration.
    pub fn integration(&self, config: Arc<PluginConfig>) -> PageActions {
        let integration = PageActions::new(config, &self.docs.dir)
            .with_extensions(self.docs.extensions.clone());

        match &self.page_actions.config_module {
            Some(path) => integration.with_module_path(path),
            None => integration,
        }
    }

    /// Builder for `output` (or the configured output) with page actions registered.
    pub fn builder(&self, output: Option<PathBuf>, base_url: Option<String>) -> Result<StaticBuilder> {
        let output_dir = output.unwrap_or_else(|| PathBuf::from(&self.docs.output));
        let config = Arc::new(self.plugin_config(base_url));

        Ok(StaticBuilder::new(output_dir, self.site_settings()?)
            .with_integration(self.integration(config)))
    }
}

fn read_sidebar_file(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sidebar file {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value = match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported sidebar file extension '{}': {}",
            other,
            path.display()
        ),
    };

    Ok(value)
}
