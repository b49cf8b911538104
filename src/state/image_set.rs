use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DeclutterError, Result};

/// Extensions we page through (compared lowercase)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Ordered list of images discovered under a source directory.
///
/// Built once at startup and never modified afterwards. Always non-empty.
#[derive(Debug, Clone)]
pub struct ImageSet {
    root: PathBuf,
    paths: Vec<PathBuf>,
}

impl ImageSet {
    /// Recursively scan `source` for images.
    ///
    /// Fails if `source` is not a directory or if no image is found.
    pub fn scan(source: &Path) -> Result<Self> {
        if !source.is_dir() {
            return Err(DeclutterError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        let root = fs::canonicalize(source)
            .map_err(|e| DeclutterError::io("resolve", source, e))?;

        tracing::debug!("Scanning folder: {}", root.display());

        let mut paths = Vec::new();
        for entry in WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_image(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        if paths.is_empty() {
            return Err(DeclutterError::NoImages { path: root });
        }

        tracing::info!("Found {} images in {}", paths.len(), root.display());

        Ok(ImageSet { root, paths })
    }

    /// Canonical source directory the paths live under
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Path at `index`. Panics when out of range.
    pub fn at(&self, index: usize) -> &Path {
        &self.paths[index]
    }
}

/// Case-insensitive extension check
fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
