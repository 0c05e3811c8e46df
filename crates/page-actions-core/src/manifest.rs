//! `llms.txt` rendering.
//!
//! The manifest lists one absolute `.md` URL per documentation page. When a
//! navigation tree is available it drives the layout (headings for groups,
//! list items for pages, in declaration order). Otherwise the generated page
//! list is used as a flat fallback. A non-empty tree always wins when both
//! exist; an empty one falls back like a missing one.

use serde::{Deserialize, Serialize};

use crate::config::PluginConfig;
use crate::nav::NavNode;

/// Name of the manifest file at the output root.
pub const MANIFEST_FILE_NAME: &str = "llms.txt";

/// First heading level used for top-level groups.
const ROOT_LEVEL: usize = 2;

/// A page produced by the host build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPage {
    /// Host pathname: `""` for the root, `"about/"` for nested pages
    pub pathname: String,
}

impl GeneratedPage {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
        }
    }

    /// Root and error pages have no markdown mirror.
    fn is_listed(&self) -> bool {
        !self.pathname.is_empty() && self.pathname != "404/"
    }

    /// Pathname with its trailing slash replaced by `.md`.
    fn markdown_path(&self) -> String {
        match self.pathname.strip_suffix('/') {
            Some(stem) => format!("{stem}.md"),
            None => self.pathname.clone(),
        }
    }
}

/// Manifest text under construction.
#[derive(Debug, Clone)]
pub struct Manifest {
    base: String,
    content: String,
}

impl Manifest {
    /// Start a manifest with the site's title line.
    pub fn new(site_title: &str, base: &str) -> Self {
        Self {
            base: base.to_string(),
            content: format!("# {site_title} Documentation\n\n"),
        }
    }

    /// Append the rendering of a navigation tree.
    pub fn push_tree(&mut self, nodes: &[NavNode]) {
        for node in nodes {
            self.push_node(node, ROOT_LEVEL);
        }
    }

    /// Append the flat listing of generated pages.
    pub fn push_pages(&mut self, pages: &[GeneratedPage]) {
        let lines: Vec<String> = pages
            .iter()
            .filter(|page| page.is_listed())
            .map(|page| format!("- {}/{}", self.base, page.markdown_path()))
            .collect();

        self.content.push_str(&lines.join("\n"));
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    fn push_node(&mut self, node: &NavNode, level: usize) {
        match node {
            NavNode::HeadingGroup { label, slug, items } => {
                self.content
                    .push_str(&format!("{} {}\n\n", "#".repeat(level), label));
                if let Some(slug) = slug {
                    self.push_url(slug);
                }
                self.push_items(items.as_deref(), level);
                self.content.push('\n');
            }
            NavNode::LinkLeaf {
                label,
                link,
                slug,
                items,
            } => {
                let url = self.url_for(link);
                match label {
                    Some(label) if level >= ROOT_LEVEL => {
                        self.content.push_str(&format!("- [{label}]({url})\n"));
                    }
                    _ => self.content.push_str(&format!("- {url}\n")),
                }
                if let Some(slug) = slug {
                    self.push_url(slug);
                }
                self.push_items(items.as_deref(), level);
            }
            NavNode::SlugLeaf { slug, items } => {
                self.push_url(slug);
                self.push_items(items.as_deref(), level);
            }
            NavNode::Group { items } => self.push_items(Some(items.as_slice()), level),
            NavNode::RawLeaf { slug } => self.push_url(slug),
        }
    }

    fn push_items(&mut self, items: Option<&[NavNode]>, level: usize) {
        for child in items.unwrap_or_default() {
            let child_level = if child.has_items() { level + 1 } else { level };
            self.push_node(child, child_level);
        }
    }

    fn push_url(&mut self, path: &str) {
        let url = self.url_for(path);
        self.content.push_str(&format!("- {url}\n"));
    }

    fn url_for(&self, path: &str) -> String {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            format!("{}/index.md", self.base)
        } else {
            format!("{}/{}.md", self.base, trimmed)
        }
    }
}

/// Render the manifest, or `None` when no base URL is configured.
pub fn render_manifest(
    config: &PluginConfig,
    site_title: &str,
    sidebar: Option<&[NavNode]>,
    pages: &[GeneratedPage],
) -> Option<String> {
    let base = config.link_base()?;
    let mut manifest = Manifest::new(site_title, base);

    match sidebar {
        Some(nodes) if !nodes.is_empty() => manifest.push_tree(nodes),
        _ => manifest.push_pages(pages),
    }

    Some(manifest.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageActionsOptions;
    use crate::nav::parse_sidebar;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(base_url: Option<&str>) -> PluginConfig {
        PluginConfig::resolve(PageActionsOptions {
            prompt: None,
            base_url: base_url.map(str::to_string),
        })
    }

    fn render_tree(sidebar: serde_json::Value) -> String {
        let nodes = parse_sidebar(&sidebar).unwrap();
        render_manifest(&config(Some("https://x.test")), "Site", Some(nodes.as_slice()), &[]).unwrap()
    }

    #[test]
    fn renders_labelled_group() {
        let output = render_tree(json!([
            { "label": "Guides", "items": [{ "label": "Start", "link": "/guides/start" }] }
        ]));

        assert_eq!(
            output,
            "# Site Documentation\n\n## Guides\n\n- [Start](https://x.test/guides/start.md)\n\n"
        );
    }

    #[test]
    fn nested_groups_deepen_headings() {
        let output = render_tree(json!([
            { "label": "Learn", "items": [
                { "label": "Overview", "link": "/learn/" },
                { "label": "Embedded", "items": [
                    { "label": "Intro", "link": "/learn/embedded/intro" },
                    { "label": "ESP32", "autogenerate": { "directory": "/learn/esp" } }
                ]},
                "learn/extra"
            ]}
        ]));

        let expected = "\
# Site Documentation

## Learn

- [Overview](https://x.test/learn.md)
### Embedded

- [Intro](https://x.test/learn/embedded/intro.md)
### ESP32



- https://x.test/learn/extra.md

";
        assert_eq!(output, expected);
    }

    #[test]
    fn link_leaf_with_items_stays_at_level() {
        let output = render_tree(json!([
            { "label": "Topic", "link": "/topic", "items": [
                { "label": "Sub", "items": [{ "link": "/topic/a" }] }
            ]}
        ]));

        let expected = "\
# Site Documentation

- [Topic](https://x.test/topic.md)
### Sub

- https://x.test/topic/a.md

";
        assert_eq!(output, expected);
    }

    #[test]
    fn slugs_and_root_links_use_index() {
        let output = render_tree(json!([
            { "items": ["/", { "slug": "/reference/" }, { "link": "///" }] }
        ]));

        assert_eq!(
            output,
            "# Site Documentation\n\n\
             - https://x.test/index.md\n\
             - https://x.test/reference.md\n\
             - https://x.test/index.md\n"
        );
    }

    #[test]
    fn heading_with_slug_lists_slug_before_children() {
        let output = render_tree(json!([
            { "label": "Ref", "slug": "ref", "items": ["ref/a"] }
        ]));

        assert_eq!(
            output,
            "# Site Documentation\n\n## Ref\n\n- https://x.test/ref.md\n- https://x.test/ref/a.md\n\n"
        );
    }

    #[test]
    fn fallback_lists_generated_pages() {
        let pages = vec![
            GeneratedPage::new(""),
            GeneratedPage::new("404/"),
            GeneratedPage::new("about/"),
        ];

        let output = render_manifest(&config(Some("https://x.test")), "Site", None, &pages).unwrap();

        assert_eq!(output, "# Site Documentation\n\n- https://x.test/about.md");
    }

    #[test]
    fn fallback_keeps_host_order() {
        let pages = vec![
            GeneratedPage::new("zeta/"),
            GeneratedPage::new("alpha/nested/"),
        ];

        let output =
            render_manifest(&config(Some("https://x.test/")), "Site", None, &pages).unwrap();

        assert_eq!(
            output,
            "# Site Documentation\n\n- https://x.test/zeta.md\n- https://x.test/alpha/nested.md"
        );
    }

    #[test]
    fn empty_tree_falls_back_to_pages() {
        let pages = vec![
            GeneratedPage::new(""),
            GeneratedPage::new("404/"),
            GeneratedPage::new("about/"),
        ];

        for sidebar in [json!([]), json!(["bare", 42])] {
            let nodes = parse_sidebar(&sidebar).unwrap();
            let output = render_manifest(
                &config(Some("https://x.test")),
                "Site",
                Some(nodes.as_slice()),
                &pages,
            )
            .unwrap();

            assert_eq!(output, "# Site Documentation\n\n- https://x.test/about.md");
        }
    }

    #[test]
    fn tree_wins_over_pages() {
        let nodes = parse_sidebar(&json!([{ "link": "/only" }])).unwrap();
        let pages = vec![GeneratedPage::new("other/")];

        let output =
            render_manifest(&config(Some("https://x.test")), "Site", Some(nodes.as_slice()), &pages).unwrap();

        assert!(output.contains("https://x.test/only.md"));
        assert!(!output.contains("other"));
    }

    #[test]
    fn skipped_without_base_url() {
        let pages = vec![GeneratedPage::new("about/")];

        assert_eq!(render_manifest(&config(None), "Site", None, &pages), None);
    }
}
