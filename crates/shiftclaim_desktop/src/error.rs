// --- File: crates/shiftclaim_desktop/src/error.rs ---
use shiftclaim_common::{automation_error, recognition_error, ShiftClaimError};
use thiserror::Error;

/// Failures while driving the chat window or reading the screen.
#[derive(Error, Debug)]
pub enum DesktopError {
    #[error("failed to execute osascript: {0}")]
    OsascriptSpawn(#[source] std::io::Error),
    #[error("AppleScript failed: {0}")]
    Script(String),
    #[error("screen capture failed: {0}")]
    Capture(String),
    #[error("capture region {x},{y} {width}x{height} lies outside the {image_width}x{image_height} screen")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("failed to write capture: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to run tesseract: {0}")]
    TesseractSpawn(#[source] std::io::Error),
    #[error("tesseract failed: {0}")]
    Tesseract(String),
    #[error("no text recognised in the capture")]
    EmptyText,
    #[error("capture task failed: {0}")]
    Join(String),
}

impl DesktopError {
    /// True for failures of window activation or keystroke injection.
    pub fn is_automation(&self) -> bool {
        matches!(self, DesktopError::OsascriptSpawn(_) | DesktopError::Script(_))
    }
}

impl From<DesktopError> for ShiftClaimError {
    fn from(err: DesktopError) -> Self {
        if err.is_automation() {
            automation_error(err)
        } else {
            recognition_error(err)
        }
    }
}
