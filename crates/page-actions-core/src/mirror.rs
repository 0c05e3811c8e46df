//! Mirror path derivation for content documents.
//!
//! Every source document under the content root gets a raw `.md` copy whose
//! path matches the public URL the site router assigns to it:
//!
//! ```text
//! index.mdx                 -> index.md
//! guides/setup/index.md     -> guides/setup.md
//! guides/setup/intro.mdx    -> guides/setup/intro.md
//! ```
//!
//! Path derivation is pure. [`ContentDocument::from_host`] adapts the
//! `(file_name, extension, full_path)` convention used by copy directives.

use std::path::Path;

/// File name that marks a folder's landing document.
pub const INDEX_NAME: &str = "index";

/// Errors that can occur when deriving a mirror path.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MirrorError {
    #[error("Document {path} is outside the content root {root}")]
    OutsideContentRoot { path: String, root: String },

    #[error("Document path has no file name: {0}")]
    EmptyPath(String),
}

/// A source document identified by its path relative to the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    /// Slash-separated path, extension included
    relative_path: String,

    /// Final segment without extension
    file_name: String,

    /// Extension without the leading dot (may be empty)
    extension: String,
}

impl ContentDocument {
    /// Build a document from a slash-separated path relative to the content root.
    pub fn new(relative_path: &str) -> Result<Self, MirrorError> {
        let relative_path = relative_path.trim_start_matches('/');
        let last = relative_path.rsplit('/').next().unwrap_or_default();

        let (file_name, extension) = match last.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, ext),
            _ => (last, ""),
        };

        if file_name.is_empty() {
            return Err(MirrorError::EmptyPath(relative_path.to_string()));
        }

        Ok(Self {
            relative_path: relative_path.to_string(),
            file_name: file_name.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Build a document from the arguments a copy directive's rename hook receives.
    ///
    /// `full_path` must contain `{content_root}/`; everything after the first
    /// occurrence is the relative path. Windows separators are normalized.
    pub fn from_host(
        file_name: &str,
        extension: &str,
        full_path: &Path,
        content_root: &str,
    ) -> Result<Self, MirrorError> {
        let normalized = full_path.to_string_lossy().replace('\\', "/");
        let root = content_root.replace('\\', "/");
        let marker = format!("{}/", root.trim_end_matches('/'));

        let Some((_, relative)) = normalized.split_once(&marker) else {
            return Err(MirrorError::OutsideContentRoot {
                path: normalized,
                root,
            });
        };

        if file_name.is_empty() {
            return Err(MirrorError::EmptyPath(relative.to_string()));
        }

        Ok(Self {
            relative_path: relative.to_string(),
            file_name: file_name.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Path relative to the content root, extension included.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Final segment without extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether this is a folder landing document.
    pub fn is_index(&self) -> bool {
        self.file_name == INDEX_NAME
    }

    /// Output path of the raw markdown mirror, relative to the output root.
    pub fn mirrored_path(&self) -> String {
        let stem = if self.extension.is_empty() {
            self.relative_path.as_str()
        } else {
            self.relative_path
                .strip_suffix(&format!(".{}", self.extension))
                .unwrap_or(&self.relative_path)
        };

        let segments: Vec<&str> = stem.split('/').collect();
        mirrored_path(&segments, &self.file_name)
    }
}

/// Derive the mirror path from the extension-less path segments.
///
/// Landing documents take their folder's name so the mirror sits at the
/// folder's own URL.
pub fn mirrored_path(segments: &[&str], file_name: &str) -> String {
    if file_name == INDEX_NAME {
        if segments.len() <= 1 {
            return format!("{INDEX_NAME}.md");
        }

        let folder_name = segments[segments.len() - 2];
        let directories = segments[..segments.len() - 2].join("/");

        return join_md(&directories, folder_name);
    }

    let directories = match segments.split_last() {
        Some((_, rest)) => rest.join("/"),
        None => String::new(),
    };

    join_md(&directories, file_name)
}

fn join_md(directories: &str, name: &str) -> String {
    if directories.is_empty() {
        format!("{name}.md")
    } else {
        format!("{directories}/{name}.md")
    }
}
