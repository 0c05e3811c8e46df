//! Core logic for page actions.
//!
//! This crate derives the raw-markdown mirror paths for documentation pages,
//! flattens the site navigation into an `llms.txt` manifest, and resolves the
//! shared plugin configuration. Nothing here touches the filesystem.

pub mod config;
pub mod manifest;
pub mod mirror;
pub mod nav;

pub use config::{PageActionsOptions, PluginConfig, DEFAULT_PROMPT};
pub use manifest::{render_manifest, GeneratedPage, Manifest, MANIFEST_FILE_NAME};
pub use mirror::{mirrored_path, ContentDocument, MirrorError, INDEX_NAME};
pub use nav::{parse_sidebar, NavError, NavNode};
