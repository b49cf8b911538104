/// Triage controller
///
/// Holds the image set, the cursor and the target directory. Actions are
/// split in two steps: `plan` moves the cursor and describes the filesystem
/// change, `TargetDir::apply` performs it. `perform` does both.

use std::path::{Path, PathBuf};

use super::image_set::ImageSet;
use super::target::TargetDir;
use crate::error::Result;

/// The four user actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Next image (stops at the last one)
    Advance,
    /// Previous image (stops at the first one)
    Retreat,
    /// Copy the current image into the target directory
    Keep,
    /// Delete the current image's copy from the target directory
    Unkeep,
}

/// Filesystem change an action requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cursor moved (or stayed at a bound); nothing to touch on disk
    Navigate,
    Copy {
        source: PathBuf,
        destination: PathBuf,
    },
    Remove { destination: PathBuf },
}

/// What actually happened once an effect was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Copied { destination: PathBuf },
    Removed { destination: PathBuf },
    /// Unkeep on an image that has no kept copy
    NotFound { destination: PathBuf },
}

impl Outcome {
    /// One-line summary for the status area
    pub fn describe(&self) -> String {
        fn name(path: &Path) -> String {
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string()
        }

        match self {
            Outcome::Moved => String::new(),
            Outcome::Copied { destination } => format!("Kept {}", name(destination)),
            Outcome::Removed { destination } => format!("Removed {}", name(destination)),
            Outcome::NotFound { destination } => format!("Not kept: {}", name(destination)),
        }
    }
}

#[derive(Debug)]
pub struct Triage {
    images: ImageSet,
    target: TargetDir,
    cursor: usize,
}

impl Triage {
    /// Start at the first image
    pub fn new(images: ImageSet, target: TargetDir) -> Self {
        Triage {
            images,
            target,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn target(&self) -> &TargetDir {
        &self.target
    }

    /// Path of the image under the cursor
    pub fn current(&self) -> &Path {
        // ImageSet is non-empty and the cursor is clamped to it
        self.images.at(self.cursor)
    }

    /// Where the current image's kept copy lives
    pub fn current_destination(&self) -> PathBuf {
        self.target.destination_for(self.images.root(), self.current())
    }

    /// Whether the image currently shown has a kept copy
    pub fn is_kept(&self) -> bool {
        self.target.is_kept(self.images.root(), self.current())
    }

    /// Move the cursor for navigation actions and describe the disk change
    pub fn plan(&mut self, action: Action) -> Effect {
        let last = self.images.len().saturating_sub(1);

        match action {
            Action::Advance => {
                self.cursor = (self.cursor + 1).min(last);
                Effect::Navigate
            }
            Action::Retreat => {
                self.cursor = self.cursor.saturating_sub(1);
                Effect::Navigate
            }
            Action::Keep => Effect::Copy {
                source: self.current().to_path_buf(),
                destination: self.current_destination(),
            },
            Action::Unkeep => Effect::Remove {
                destination: self.current_destination(),
            },
        }
    }

    /// Plan and apply in one go
    pub fn perform(&mut self, action: Action) -> Result<Outcome> {
        let effect = self.plan(action);
        self.target.apply(effect)
    }

    /// `Image 3 of 120`, with a check mark when the shown image is kept
    pub fn status(&self) -> String {
        status_line(self.cursor, self.len(), self.is_kept())
    }
}

pub fn status_line(cursor: usize, total: usize, kept: bool) -> String {
    let checkmark = if kept { " ✅" } else { "" };
    format!("Image {} of {}{}", cursor + 1, total, checkmark)
}
