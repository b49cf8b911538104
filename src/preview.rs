/// Preview generation for the image on screen
///
/// Decodes a jpg/png and shrinks it so the longest edge fits the window.
/// Runs on the blocking pool so the UI stays responsive.

use image::imageops::FilterType;
use std::path::{Path, PathBuf};

/// Default longest edge of a preview, in pixels
pub const DEFAULT_MAX_EDGE: u32 = 1600;

/// Decoded, resized RGBA pixels ready for the image widget
#[derive(Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preview")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Load a preview for `path` with neither edge above `max_edge`
pub async fn load_preview(path: PathBuf, max_edge: u32) -> Result<Preview, String> {
    tokio::task::spawn_blocking(move || load_preview_blocking(&path, max_edge))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking version of preview loading
fn load_preview_blocking(path: &Path, max_edge: u32) -> Result<Preview, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;

    // Like a thumbnail: shrink to fit, never enlarge
    let img = if img.width() > max_edge || img.height() > max_edge {
        img.resize(max_edge, max_edge, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    tracing::debug!("Preview {}x{} for {}", width, height, path.display());

    Ok(Preview {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
