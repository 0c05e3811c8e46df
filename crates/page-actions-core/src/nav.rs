//! Navigation tree ingestion.
//!
//! Sidebar descriptions arrive loosely shaped: children may be strings or
//! objects, and which optional fields are present decides what a node is.
//! [`parse_sidebar`] resolves that shape once into [`NavNode`] so rendering
//! can match exhaustively.

use serde_json::{Map, Value};

/// A resolved navigation node.
///
/// `items` is `Some` whenever the source node carried an `items` array, even
/// an empty one; nested nodes render one heading level deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    /// A labelled node without a link: renders as a heading.
    HeadingGroup {
        label: String,
        slug: Option<String>,
        items: Option<Vec<NavNode>>,
    },

    /// A node with a link.
    LinkLeaf {
        label: Option<String>,
        link: String,
        slug: Option<String>,
        items: Option<Vec<NavNode>>,
    },

    /// A node addressed by slug, with neither label nor link.
    SlugLeaf {
        slug: String,
        items: Option<Vec<NavNode>>,
    },

    /// Children only.
    Group { items: Vec<NavNode> },

    /// A bare string child.
    RawLeaf { slug: String },
}

/// Errors that can occur when reading a sidebar description.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavError {
    #[error("Sidebar must be an array, found {0}")]
    NotAnArray(&'static str),
}

impl NavNode {
    /// Resolve an object node. Returns `None` for values that carry no
    /// label, link, slug or items.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let link = string_field(object, "link");
        // A link of any other truthy kind still suppresses the heading.
        let label = if link.is_none() && object.get("link").is_some_and(is_truthy) {
            None
        } else {
            string_field(object, "label")
        };
        let slug = string_field(object, "slug");
        let items = object
            .get("items")
            .and_then(Value::as_array)
            .map(|children| children.iter().filter_map(Self::from_child).collect());

        let node = match (link, label, slug, items) {
            (Some(link), label, slug, items) => NavNode::LinkLeaf {
                label,
                link,
                slug,
                items,
            },
            (None, Some(label), slug, items) => NavNode::HeadingGroup { label, slug, items },
            (None, None, Some(slug), items) => NavNode::SlugLeaf { slug, items },
            (None, None, None, Some(items)) => NavNode::Group { items },
            (None, None, None, None) => {
                tracing::debug!("Skipping sidebar entry without label, link, slug or items");
                return None;
            }
        };

        Some(node)
    }

    fn from_child(value: &Value) -> Option<Self> {
        match value {
            Value::String(slug) => Some(NavNode::RawLeaf { slug: slug.clone() }),
            Value::Object(_) => Self::from_value(value),
            other => {
                tracing::debug!("Skipping sidebar child of type {}", type_name(other));
                None
            }
        }
    }

    /// Whether the source node carried an `items` array.
    pub fn has_items(&self) -> bool {
        match self {
            NavNode::HeadingGroup { items, .. }
            | NavNode::LinkLeaf { items, .. }
            | NavNode::SlugLeaf { items, .. } => items.is_some(),
            NavNode::Group { .. } => true,
            NavNode::RawLeaf { .. } => false,
        }
    }
}

/// Resolve a sidebar description.
///
/// Top-level entries must be objects; anything else contributes nothing.
pub fn parse_sidebar(value: &Value) -> Result<Vec<NavNode>, NavError> {
    let entries = value
        .as_array()
        .ok_or_else(|| NavError::NotAnArray(type_name(value)))?;

    Ok(entries.iter().filter_map(NavNode::from_value).collect())
}

/// Non-empty string field; other types count as absent.
fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Loose truthiness as sidebar authors write it: `null`, `false`, `0` and
/// `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn resolves_node_kinds() {
        let sidebar = json!([
            { "label": "Guides", "items": [
                { "label": "Start", "link": "/guides/start" },
                "guides/raw",
                { "slug": "guides/slugged" }
            ]},
            { "link": "/about" }
        ]);

        let nodes = parse_sidebar(&sidebar).unwrap();

        assert_eq!(
            nodes,
            vec![
                NavNode::HeadingGroup {
                    label: "Guides".to_string(),
                    slug: None,
                    items: Some(vec![
                        NavNode::LinkLeaf {
                            label: Some("Start".to_string()),
                            link: "/guides/start".to_string(),
                            slug: None,
                            items: None,
                        },
                        NavNode::RawLeaf {
                            slug: "guides/raw".to_string()
                        },
                        NavNode::SlugLeaf {
                            slug: "guides/slugged".to_string(),
                            items: None,
                        },
                    ]),
                },
                NavNode::LinkLeaf {
                    label: None,
                    link: "/about".to_string(),
                    slug: None,
                    items: None,
                },
            ]
        );
    }

    #[test]
    fn drops_entries_without_content() {
        let sidebar = json!([
            { "icon": "star" },
            "top-level-string",
            { "label": "" },
            { "label": "Auto", "autogenerate": { "directory": "reference" } }
        ]);

        let nodes = parse_sidebar(&sidebar).unwrap();

        assert_eq!(
            nodes,
            vec![NavNode::HeadingGroup {
                label: "Auto".to_string(),
                slug: None,
                items: None,
            }]
        );
    }

    #[test]
    fn non_string_link_suppresses_heading() {
        assert_eq!(NavNode::from_value(&json!({ "label": "Odd", "link": 42 })), None);
        assert_eq!(
            NavNode::from_value(&json!({ "label": "Odd", "link": true, "items": ["a"] })),
            Some(NavNode::Group {
                items: vec![NavNode::RawLeaf { slug: "a".into() }]
            })
        );
        assert_eq!(
            NavNode::from_value(&json!({ "label": "Odd", "link": { "href": "/x" }, "slug": "odd" })),
            Some(NavNode::SlugLeaf {
                slug: "odd".into(),
                items: None
            })
        );
    }

    #[test]
    fn falsy_link_keeps_heading() {
        for link in [json!(null), json!(false), json!(0), json!("")] {
            let node = NavNode::from_value(&json!({ "label": "Kept", "link": link })).unwrap();

            assert!(matches!(node, NavNode::HeadingGroup { .. }), "link {link}");
        }
    }

    #[test]
    fn empty_items_still_mark_nesting() {
        let node = NavNode::from_value(&json!({ "label": "Empty", "items": [] })).unwrap();

        assert!(node.has_items());
        assert!(!NavNode::RawLeaf { slug: "a".into() }.has_items());
    }

    #[test]
    fn rejects_non_array_sidebar() {
        assert_eq!(
            parse_sidebar(&json!({ "label": "x" })),
            Err(NavError::NotAnArray("object"))
        );
    }
}
