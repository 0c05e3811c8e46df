//! Copy directive execution.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use page_actions_core::MirrorError;

use crate::builder::BuildError;

/// Per-file rename hook: `(file_name, extension, full_path)` to a path
/// relative to the copy destination.
pub type RenameFn = Arc<dyn Fn(&str, &str, &Path) -> Result<PathBuf, MirrorError> + Send + Sync>;

/// A request to copy matching files from a source tree into the output.
#[derive(Clone)]
pub struct CopyTarget {
    /// Source directory to walk
    pub src: PathBuf,

    /// Extensions to match, without the leading dot
    pub extensions: Vec<String>,

    /// Destination relative to the output directory (empty for the root)
    pub dest: PathBuf,

    /// Maps each matched file to its destination path
    pub rename: RenameFn,
}

impl fmt::Debug for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyTarget")
            .field("src", &self.src)
            .field("extensions", &self.extensions)
            .field("dest", &self.dest)
            .finish_non_exhaustive()
    }
}

impl CopyTarget {
    fn matches(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.extensions.iter().any(|e| e == ext)
    }
}

/// Copy every matching file under `target.src` into `output_dir`.
///
/// Returns the number of files copied. Two sources renamed onto the same
/// destination abort the copy.
pub fn execute_copy(target: &CopyTarget, output_dir: &Path) -> Result<usize, BuildError> {
    if !target.src.exists() {
        return Err(BuildError::ReadError(format!(
            "Content directory not found: {}",
            target.src.display()
        )));
    }

    let dest_root = output_dir.join(&target.dest);
    let mut seen: HashMap<PathBuf, PathBuf> = HashMap::new();

    for entry in WalkDir::new(&target.src)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry =
            entry.map_err(|e| BuildError::ReadError(format!("Failed to walk content: {}", e)))?;
        let path = entry.path();

        if !path.is_file() || !target.matches(path) {
            continue;
        }

        let file_name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let relative = (target.rename)(file_name, extension, path)?;
        let dest = dest_root.join(&relative);

        if let Some(first) = seen.get(&dest) {
            return Err(BuildError::Collision {
                first: first.display().to_string(),
                second: path.display().to_string(),
                dest: dest.display().to_string(),
            });
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::copy(path, &dest).map_err(|e| {
            BuildError::WriteError(format!("{} -> {}: {}", path.display(), dest.display(), e))
        })?;

        tracing::debug!("Mirrored {} -> {}", path.display(), relative.display());
        seen.insert(dest, path.to_path_buf());
    }

    Ok(seen.len())
}
