use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{DeclutterError, Result};
use crate::state::triage::{Effect, Outcome};

/// How a kept image is named inside the target directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyMode {
    /// File name only. Two sources with the same name share one kept copy.
    #[default]
    Basename,
    /// Path relative to the source root, separators encoded as `%2F`
    RelativePath,
}

/// Directory that receives kept copies.
///
/// An image counts as kept iff a file with its kept-name exists here.
#[derive(Debug, Clone)]
pub struct TargetDir {
    path: PathBuf,
    key_mode: KeyMode,
}

impl TargetDir {
    /// Open the target directory, creating it (and parents) if missing
    pub fn open(path: impl Into<PathBuf>, key_mode: KeyMode) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            fs::create_dir_all(&path)
                .map_err(|e| DeclutterError::io("create", &path, e))?;
            tracing::info!("Created target directory: {}", path.display());
        }

        Ok(TargetDir { path, key_mode })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    /// Where the kept copy of `image` lives (whether or not it exists)
    pub fn destination_for(&self, root: &Path, image: &Path) -> PathBuf {
        self.path.join(kept_name(root, image, self.key_mode))
    }

    /// Whether `image` currently has a kept copy
    pub fn is_kept(&self, root: &Path, image: &Path) -> bool {
        self.destination_for(root, image).is_file()
    }

    /// Carry out an effect planned by the triage controller
    pub fn apply(&self, effect: Effect) -> Result<Outcome> {
        match effect {
            Effect::Navigate => Ok(Outcome::Moved),
            Effect::Copy {
                source,
                destination,
            } => {
                // Target inside the source tree: the image is its own kept copy.
                // fs::copy would truncate it to zero bytes.
                if is_same_file(&source, &destination) {
                    tracing::info!("Already kept: {}", destination.display());
                    return Ok(Outcome::Copied { destination });
                }

                fs::copy(&source, &destination)
                    .map_err(|e| DeclutterError::io("copy", &source, e))?;
                tracing::info!("Copied: {}", source.display());
                Ok(Outcome::Copied { destination })
            }
            Effect::Remove { destination } => {
                if !destination.is_file() {
                    tracing::info!("File not found: {}", destination.display());
                    return Ok(Outcome::NotFound { destination });
                }

                match fs::remove_file(&destination) {
                    Ok(()) => {
                        tracing::info!("Removed: {}", destination.display());
                        Ok(Outcome::Removed { destination })
                    }
                    // Lost a race with something else deleting it
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        tracing::info!("File not found: {}", destination.display());
                        Ok(Outcome::NotFound { destination })
                    }
                    Err(e) => Err(DeclutterError::io("remove", &destination, e)),
                }
            }
        }
    }
}

/// Both paths exist and resolve to the same file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// File name for the kept copy of `image`
pub fn kept_name(root: &Path, image: &Path, mode: KeyMode) -> String {
    let basename = || {
        image
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    };

    match mode {
        KeyMode::Basename => basename(),
        KeyMode::RelativePath => match image.strip_prefix(root) {
            Ok(relative) => encode_relative(relative),
            Err(_) => basename(),
        },
    }
}

/// `%` -> `%25`, separator -> `%2F`. Injective, so distinct paths never collide.
fn encode_relative(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().replace('%', "%25")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("%2F")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kept_name_basename() {
        let root = Path::new("/photos");
        let image = Path::new("/photos/2023/trip/a.jpg");
        assert_eq!(kept_name(root, image, KeyMode::Basename), "a.jpg");
    }

    #[test]
    fn test_kept_name_relative_path() {
        let root = Path::new("/photos");
        let a = root.join("2023").join("a.jpg");
        let b = root.join("2024").join("a.jpg");

        assert_eq!(kept_name(root, &a, KeyMode::RelativePath), "2023%2Fa.jpg");
        assert_ne!(
            kept_name(root, &a, KeyMode::RelativePath),
            kept_name(root, &b, KeyMode::RelativePath)
        );
        assert_eq!(
            kept_name(root, &a, KeyMode::Basename),
            kept_name(root, &b, KeyMode::Basename)
        );
    }

    #[test]
    fn test_kept_name_escapes_percent() {
        let root = Path::new("/photos");
        // A literal "%2F" in a file name must not look like a separator
        let tricky = root.join("x%2Fa.jpg");
        let nested = root.join("x").join("a.jpg");

        assert_eq!(kept_name(root, &tricky, KeyMode::RelativePath), "x%252Fa.jpg");
        assert_ne!(
            kept_name(root, &tricky, KeyMode::RelativePath),
            kept_name(root, &nested, KeyMode::RelativePath)
        );
    }

    #[test]
    fn test_open_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("kept").join("deep");

        let target_dir = TargetDir::open(&target, KeyMode::Basename).unwrap();
        assert!(target.is_dir());
        assert_eq!(target_dir.path(), target.as_path());
    }

    #[test]
    fn test_remove_missing_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let target_dir = TargetDir::open(dir.path(), KeyMode::Basename).unwrap();
        let destination = dir.path().join("ghost.jpg");

        let outcome = target_dir
            .apply(Effect::Remove {
                destination: destination.clone(),
            })
            .unwrap();

        assert_eq!(outcome, Outcome::NotFound { destination });
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_copy_onto_itself_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target_dir = TargetDir::open(dir.path(), KeyMode::Basename).unwrap();
        let photo = dir.path().join("a.jpg");
        fs::write(&photo, b"photo bytes").unwrap();

        let outcome = target_dir
            .apply(Effect::Copy {
                source: photo.clone(),
                destination: photo.clone(),
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Copied { destination: photo.clone() });
        assert_eq!(fs::read(&photo).unwrap(), b"photo bytes");
    }

    #[test]
    fn test_copy_unreadable_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target_dir = TargetDir::open(dir.path().join("kept"), KeyMode::Basename).unwrap();

        let err = target_dir
            .apply(Effect::Copy {
                source: dir.path().join("missing.jpg"),
                destination: target_dir.path().join("missing.jpg"),
            })
            .unwrap_err();

        assert!(matches!(err, DeclutterError::Io { action: "copy", .. }));
    }
}
