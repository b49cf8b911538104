/// Error types for declutter
///
/// Startup failures (bad source, no images, bad config) are fatal.
/// I/O failures during keep/unkeep are reported back to the UI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeclutterError {
    /// Source directory missing or not a directory
    #[error("Source directory not found: {path:?}")]
    SourceNotFound { path: PathBuf },

    /// Scan finished without a single jpg/jpeg/png
    #[error("No images found in {path:?}")]
    NoImages { path: PathBuf },

    /// Filesystem operation failed
    #[error("Failed to {action} {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// Config file could not be read
    #[error("Failed to read config {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for our schema
    #[error("Invalid config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Folder picker was closed without a choice
    #[error("No source directory selected")]
    NoSourceSelected,

    /// Window or renderer failed
    #[error("UI error: {0}")]
    Ui(#[from] iced::Error),
}

impl DeclutterError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeclutterError>;
