// --- File: crates/shiftclaim_desktop/src/applescript.rs ---
//! Thin wrapper around `osascript`.

use crate::error::DesktopError;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs `script` through `osascript -e` and returns its trimmed stdout.
///
/// # Errors
///
/// Returns `DesktopError::OsascriptSpawn` if `osascript` cannot be started and
/// `DesktopError::Script` with the trimmed stderr if the script fails.
pub async fn run_applescript(script: &str) -> Result<String, DesktopError> {
    debug!("Running AppleScript ({} bytes)", script.len());
    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .await
        .map_err(DesktopError::OsascriptSpawn)?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(DesktopError::Script(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

/// Escapes `value` for use inside an AppleScript string literal.
pub fn applescript_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

pub fn activate_script(app_name: &str) -> String {
    format!(
        "tell application \"{}\" to activate",
        applescript_escape(app_name)
    )
}

/// Builds a System Events script that types `text` one character at a time,
/// pausing `interval` after each, then presses Return.
pub fn typing_script(text: &str, interval: Duration) -> String {
    let delay = format!("{:.3}", interval.as_secs_f64());
    let mut script = String::from("tell application \"System Events\"\n");
    for ch in text.chars() {
        let mut buf = [0u8; 4];
        script.push_str(&format!(
            "    keystroke \"{}\"\n    delay {}\n",
            applescript_escape(ch.encode_utf8(&mut buf)),
            delay
        ));
    }
    // Return
    script.push_str("    key code 36\nend tell");
    script
}
