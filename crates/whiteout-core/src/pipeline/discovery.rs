//! File discovery for finding images in a directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::normalize_extension;

/// Discovers image files in a directory, top level or recursively.
pub struct FileDiscovery {
    extensions: Vec<String>,
    recursive: bool,
}

impl FileDiscovery {
    /// Create a new discovery instance.
    pub fn new(extensions: &[String], recursive: bool) -> Self {
        Self {
            extensions: extensions.iter().map(|e| normalize_extension(e)).collect(),
            recursive,
        }
    }

    /// Find every matching file under `dir`, sorted by path.
    pub fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_supported(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        // Sort by path for deterministic ordering
        files.sort();
        files
    }

    /// Check if a file has one of the configured extensions.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext_lower)
            })
            .unwrap_or(false)
    }
}
