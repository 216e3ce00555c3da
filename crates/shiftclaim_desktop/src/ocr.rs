// --- File: crates/shiftclaim_desktop/src/ocr.rs ---
//! Text recognition of the chat window through the `tesseract` binary.

use crate::capture::{capture_primary_monitor, crop_region};
use crate::error::DesktopError;
use shiftclaim_common::services::{BoxFuture, ScreenReader};
use shiftclaim_common::ShiftClaimError;
use shiftclaim_config::{CaptureRegion, OcrConfig, WatcherConfig};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Arguments for `tesseract <image> stdout --psm N [-l LANG]`.
pub fn tesseract_args(image_path: &Path, config: &OcrConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        image_path.as_os_str().to_os_string(),
        "stdout".into(),
        "--psm".into(),
        config.psm.to_string().into(),
    ];
    if let Some(language) = config.language.as_deref().filter(|l| !l.is_empty()) {
        args.push("-l".into());
        args.push(language.into());
    }
    args
}

/// Runs tesseract on an image file and returns the recognised text.
///
/// # Errors
///
/// Fails if the binary cannot be started or exits unsuccessfully.
pub async fn run_tesseract(image_path: &Path, config: &OcrConfig) -> Result<String, DesktopError> {
    let output = Command::new(&config.tesseract_path)
        .args(tesseract_args(image_path, config))
        .output()
        .await
        .map_err(DesktopError::TesseractSpawn)?;
    if !output.status.success() {
        return Err(DesktopError::Tesseract(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Reads the chat by capturing the configured region and running OCR on it.
#[derive(Debug, Clone)]
pub struct TesseractScreenReader {
    region: CaptureRegion,
    ocr: OcrConfig,
    scratch_path: PathBuf,
}

impl TesseractScreenReader {
    pub fn new(region: CaptureRegion, ocr: OcrConfig) -> Self {
        let scratch_path =
            std::env::temp_dir().join(format!("shiftclaim_ocr_{}.png", std::process::id()));
        Self {
            region,
            ocr,
            scratch_path,
        }
    }

    pub fn from_config(config: &WatcherConfig) -> Self {
        Self::new(config.capture.clone(), config.ocr.clone())
    }

    async fn recognise(&self) -> Result<String, DesktopError> {
        let region = self.region.clone();
        let path = self.scratch_path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), DesktopError> {
            let screen = capture_primary_monitor()?;
            let cropped = crop_region(&screen, &region)?;
            cropped.save(&path)?;
            Ok(())
        })
        .await
        .map_err(|e| DesktopError::Join(e.to_string()))??;

        let result = run_tesseract(&self.scratch_path, &self.ocr).await;
        if let Err(e) = tokio::fs::remove_file(&self.scratch_path).await {
            warn!("Could not remove {}: {}", self.scratch_path.display(), e);
        }

        let text = result?;
        if text.trim().is_empty() {
            return Err(DesktopError::EmptyText);
        }
        debug!("Recognised {} characters", text.len());
        Ok(text)
    }
}

impl ScreenReader for TesseractScreenReader {
    fn read_text(&self) -> BoxFuture<'_, String, ShiftClaimError> {
        Box::pin(async move { Ok(self.recognise().await?) })
    }
}
