// --- File: crates/shiftclaim_desktop/src/lib.rs ---
// Declare modules within this crate
pub mod applescript;
pub mod capture;
pub mod error;
pub mod ocr;
pub mod window;

pub use error::DesktopError;
pub use ocr::TesseractScreenReader;
pub use window::MacChatWindow;
