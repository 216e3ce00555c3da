// --- File: crates/shiftclaim_desktop/src/capture.rs ---
//! Screen capture of the primary display.

use crate::error::DesktopError;
use image::RgbaImage;
use shiftclaim_config::CaptureRegion;

/// Cuts `region` out of a full-screen capture.
///
/// # Errors
///
/// Returns `DesktopError::RegionOutOfBounds` unless the whole region lies on
/// the screen.
pub fn crop_region(screen: &RgbaImage, region: &CaptureRegion) -> Result<RgbaImage, DesktopError> {
    let fits = region.width > 0
        && region.height > 0
        && region.x.checked_add(region.width).is_some_and(|r| r <= screen.width())
        && region.y.checked_add(region.height).is_some_and(|b| b <= screen.height());
    if !fits {
        return Err(DesktopError::RegionOutOfBounds {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            image_width: screen.width(),
            image_height: screen.height(),
        });
    }
    let cropped =
        image::imageops::crop_imm(screen, region.x, region.y, region.width, region.height);
    Ok(cropped.to_image())
}

/// Captures the primary monitor.
///
/// Blocking; call it from `spawn_blocking`.
#[cfg(target_os = "macos")]
pub fn capture_primary_monitor() -> Result<RgbaImage, DesktopError> {
    let monitors = xcap::Monitor::all().map_err(|e| DesktopError::Capture(e.to_string()))?;
    let monitor = monitors
        .iter()
        .find(|m| m.is_primary())
        .or_else(|| monitors.first())
        .ok_or_else(|| DesktopError::Capture("no monitors found".to_string()))?;

    let captured = monitor
        .capture_image()
        .map_err(|e| DesktopError::Capture(e.to_string()))?;

    // Copy into our own buffer so the image crate version xcap links does not leak out
    let (width, height) = (captured.width(), captured.height());
    let mut raw_pixels: Vec<u8> = Vec::with_capacity((width * height * 4) as usize);
    for p in captured.pixels() {
        raw_pixels.extend_from_slice(&p.0);
    }
    RgbaImage::from_raw(width, height, raw_pixels)
        .ok_or_else(|| DesktopError::Capture("captured buffer has the wrong size".to_string()))
}

#[cfg(not(target_os = "macos"))]
pub fn capture_primary_monitor() -> Result<RgbaImage, DesktopError> {
    Err(DesktopError::Capture(
        "screen capture is only supported on macOS".to_string(),
    ))
}
