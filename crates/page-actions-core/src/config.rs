//! Plugin configuration resolution.

use serde::{Deserialize, Serialize};

/// Prompt used when the caller does not supply one.
///
/// `{url}` is replaced with the absolute URL of the page's markdown mirror.
pub const DEFAULT_PROMPT: &str = "Read {url}. I want to ask questions about it.";

/// Options supplied by the caller at registration time.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PageActionsOptions {
    /// Prompt template for AI chat links
    #[serde(default)]
    pub prompt: Option<String>,

    /// Absolute base URL of the published site
    #[serde(default, alias = "baseUrl")]
    pub base_url: Option<String>,
}

/// Resolved, immutable plugin configuration.
///
/// Serializes to the shape client code reads: `{"prompt": ..., "baseUrl": ...}`,
/// with `baseUrl` omitted when absent.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::resolve(PageActionsOptions::default())
    }
}

impl PluginConfig {
    /// Merge caller options over the defaults.
    ///
    /// Blank strings are treated as absent.
    pub fn resolve(options: PageActionsOptions) -> Self {
        let prompt = options
            .prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string());
        let base_url = options.base_url.filter(|u| !u.trim().is_empty());

        Self { prompt, base_url }
    }

    /// Prompt template, still containing its `{url}` placeholder.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Base URL exactly as configured.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Base URL with a single trailing slash removed, used to anchor manifest links.
    pub fn link_base(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|url| url.strip_suffix('/').unwrap_or(url))
    }

    /// Prompt with `{url}` substituted.
    pub fn prompt_for(&self, url: &str) -> String {
        self.prompt.replace("{url}", url)
    }

    /// JSON form exposed to client code.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prompt_and_omits_base_url() {
        let config = PluginConfig::default();

        assert_eq!(config.prompt(), DEFAULT_PROMPT);
        assert_eq!(config.base_url(), None);
        assert_eq!(
            config.to_json().unwrap(),
            r#"{"prompt":"Read {url}. I want to ask questions about it."}"#
        );
    }

    #[test]
    fn user_options_override_defaults() {
        let config = PluginConfig::resolve(PageActionsOptions {
            prompt: Some("Summarize {url}".to_string()),
            base_url: Some("https://docs.example.com".to_string()),
        });

        assert_eq!(config.prompt(), "Summarize {url}");
        assert_eq!(config.base_url(), Some("https://docs.example.com"));
        assert_eq!(
            config.to_json().unwrap(),
            r#"{"prompt":"Summarize {url}","baseUrl":"https://docs.example.com"}"#
        );
    }

    #[test]
    fn blank_options_fall_back() {
        let config = PluginConfig::resolve(PageActionsOptions {
            prompt: Some("   ".to_string()),
            base_url: Some(String::new()),
        });

        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn link_base_strips_one_trailing_slash() {
        let config = PluginConfig::resolve(PageActionsOptions {
            prompt: None,
            base_url: Some("https://x.test/".to_string()),
        });

        assert_eq!(config.link_base(), Some("https://x.test"));
        assert_eq!(config.base_url(), Some("https://x.test/"));
    }

    #[test]
    fn substitutes_url_into_prompt() {
        let config = PluginConfig::default();

        assert_eq!(
            config.prompt_for("https://x.test/a.md"),
            "Read https://x.test/a.md. I want to ask questions about it."
        );
    }

    #[test]
    fn accepts_camel_case_base_url() {
        let options: PageActionsOptions =
            serde_json::from_str(r#"{"baseUrl":"https://x.test"}"#).unwrap();

        assert_eq!(options.base_url.as_deref(), Some("https://x.test"));
    }
}
