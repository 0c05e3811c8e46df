//! Generated page discovery.
//!
//! Reconstructs the host's page list from the HTML it wrote, using the
//! host pathname convention:
//!
//! ```text
//! index.html            -> ""
//! about/index.html      -> "about/"
//! 404.html              -> "404/"
//! ```

use std::path::Path;

use walkdir::WalkDir;

use page_actions_core::GeneratedPage;

use crate::builder::BuildError;

/// List the pages generated under `output_dir`, in file-name order.
pub fn discover_pages(output_dir: &Path) -> Result<Vec<GeneratedPage>, BuildError> {
    if !output_dir.exists() {
        return Err(BuildError::ReadError(format!(
            "Output directory not found: {}",
            output_dir.display()
        )));
    }

    let mut pages = Vec::new();

    for entry in WalkDir::new(output_dir)
        .sort_by_file_name()
    {
        let entry =
            entry.map_err(|e| BuildError::ReadError(format!("Failed to walk output: {}", e)))?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }

        let relative = path.strip_prefix(output_dir).unwrap_or(path);
        pages.push(GeneratedPage::new(pathname_for(relative)));
    }

    Ok(pages)
}

fn pathname_for(relative: &Path) -> String {
    let slashed = relative.to_string_lossy().replace('\\', "/");

    if slashed == "index.html" {
        return String::new();
    }

    match slashed.strip_suffix("/index.html") {
        Some(dir) => format!("{dir}/"),
        None => format!("{}/", slashed.trim_end_matches(".html")),
    }
}
