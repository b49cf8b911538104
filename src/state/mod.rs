/// State management module
///
/// Everything here runs without a window:
/// - Image discovery (image_set.rs)
/// - Target directory and kept-file naming (target.rs)
/// - Cursor and keep/unkeep actions (triage.rs)

pub mod image_set;
pub mod target;
pub mod triage;

pub use image_set::ImageSet;
pub use target::{KeyMode, TargetDir};
pub use triage::{Action, Triage};
