use image::RgbaImage;
use thiserror::Error;

use ts_app::geometry::RectI32;

/// Screen snapshot provider (OS collaborator).
///
/// The capture overlay is full-screen and coordinate-aligned with the returned buffer, so
/// overlay-local rectangles crop the buffer directly.
pub trait ScreenSource {
    fn grab_screen(&self) -> anyhow::Result<RgbaImage>;
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("screen grab failed: {0}")]
    Grab(#[source] anyhow::Error),
    #[error("selection region is empty or off-screen")]
    EmptyRegion,
}

/// Snapshot the screen and crop to `rect`.
///
/// Purely in-memory; the rectangle is clamped to the screen buffer and an empty result is an
/// error so the caller can skip the cycle.
pub fn capture_region(
    source: &dyn ScreenSource,
    rect: RectI32,
) -> Result<RgbaImage, SnapshotError> {
    let screen = source.grab_screen().map_err(SnapshotError::Grab)?;

    let clamped = rect
        .clamped_to_screen(screen.width(), screen.height())
        .ok_or(SnapshotError::EmptyRegion)?;

    let cropped = image::imageops::crop_imm(
        &screen,
        clamped.left as u32,
        clamped.top as u32,
        clamped.width() as u32,
        clamped.height() as u32,
    )
    .to_image();

    Ok(cropped)
}
