//! Initialize page actions in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing page-actions...");

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let docs_dir = Path::new("src/content/docs");
    let guides_dir = docs_dir.join("guides");
    fs::create_dir_all(&guides_dir).context("Failed to create content directory")?;

    let pages = [
        (docs_dir.join("index.md"), DEFAULT_INDEX),
        (guides_dir.join("getting-started.md"), DEFAULT_GETTING_STARTED),
    ];

    for (path, content) in pages {
        if !path.exists() || yes {
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Set page_actions.base_url, then run 'page-actions build' after your site build.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# page-actions configuration

[docs]
# Content root holding the source documents
dir = "src/content/docs"

# Output directory of the site build
output = "dist"

# Site title, used for the llms.txt heading
title = "My Documentation"

# Document extensions to mirror
extensions = ["md", "mdx"]

# Navigation tree. Without one, llms.txt lists every generated page.
# Entries may also live in a JSON or YAML file: sidebar_file = "sidebar.yaml"
[[docs.sidebar]]
label = "Guides"
items = [
    { label = "Getting Started", link = "/guides/getting-started" },
]

[page_actions]
# Prompt for AI chat links; {url} becomes the page's markdown URL
prompt = "Read {url}. I want to ask questions about it."

# Absolute site URL. llms.txt is only written when this is set.
# base_url = "https://docs.example.com"

# Generated client config module, relative to the output directory
# config_module = "_page-actions/config.js"
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
---

# Welcome

Every page on this site is also available as raw markdown: append `.md` to
its URL.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
---

# Getting Started

Build your site, then run:

```bash
page-actions build
```

This copies each document to a `.md` file next to its HTML page and writes
`llms.txt` listing every page.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;

    #[test]
    fn default_config_parses() {
        let config: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.docs.dir, "src/content/docs");
        assert_eq!(config.plugin_config(None).base_url(), None);
        assert_eq!(config.sidebar().unwrap().map(|s| s.len()), Some(1));
    }
}
