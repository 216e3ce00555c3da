// --- File: crates/shiftclaim_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Screen capture region ---
// Coordinates are in captured-image pixels of the primary display.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CaptureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureRegion {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 800,
            height: 600,
        }
    }
}

// --- OCR Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Path or name of the tesseract binary.
    pub tesseract_path: String,
    /// Tesseract page segmentation mode.
    pub psm: u8,
    /// Optional tesseract language code (e.g. "eng").
    pub language: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: "tesseract".to_string(),
            psm: 6,
            language: None,
        }
    }
}

// --- Messaging window automation ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct WatcherConfig {
    /// Application name passed to `tell application "..." to activate`.
    pub app_name: String,
    /// Text typed into the chat when a shift is claimed.
    pub reply_text: String,
    pub capture: CaptureRegion,
    pub ocr: OcrConfig,
    /// Wait after activating the window before capturing it.
    pub focus_settle_ms: u64,
    /// Wait before the first keystroke of a reply.
    pub pre_typing_delay_ms: u64,
    /// Delay between typed characters.
    pub keystroke_interval_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            app_name: "WhatsApp".to_string(),
            reply_text: "I'm free, I can take over!".to_string(),
            capture: CaptureRegion::default(),
            ocr: OcrConfig::default(),
            focus_settle_ms: 1000,
            pre_typing_delay_ms: 500,
            keystroke_interval_ms: 100,
        }
    }
}

// --- Claim loop ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClaimLoopConfig {
    /// Cancellation phrasings, matched case-insensitively in list order.
    pub phrases: Vec<String>,
    /// Verbs that, next to one of `topic_words`, also mark a cancellation.
    /// Inflected forms match ("cancelled", "skipping").
    pub cancel_verbs: Vec<String>,
    pub topic_words: Vec<String>,
    pub poll_interval_secs: u64,
}

pub const DEFAULT_PHRASES: &[&str] = &[
    "can someone cover",
    "need someone for",
    "anyone cover",
    "cancel office hours",
    "cancelling office hours",
    "cancel my office hours",
    "can't make my shift",
    "drop my shift",
];

pub const DEFAULT_CANCEL_VERBS: &[&str] = &["cancel", "skip", "drop", "remove", "postpone"];

pub const DEFAULT_TOPIC_WORDS: &[&str] = &["office hours", "oh", "ta hours", "hours"];

impl Default for ClaimLoopConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            cancel_verbs: DEFAULT_CANCEL_VERBS.iter().map(|p| p.to_string()).collect(),
            topic_words: DEFAULT_TOPIC_WORDS.iter().map(|p| p.to_string()).collect(),
            poll_interval_secs: 10,
        }
    }
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GcalConfig {
    /// OAuth client configuration downloaded from the Google Cloud console.
    pub client_secret_path: String,
    /// Token cache written after the first browser consent.
    pub token_cache_path: String,
    pub calendar_id: String,
    /// IANA zone the parsed shift times are interpreted in.
    pub time_zone: String,
    pub event_summary: String,
    pub max_results: i32,
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            client_secret_path: "credentials.json".to_string(),
            token_cache_path: "token.json".to_string(),
            calendar_id: "primary".to_string(),
            time_zone: "America/New_York".to_string(),
            event_summary: "TA Office Hours (Covered)".to_string(),
            max_results: 10,
        }
    }
}

// --- Logging ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs are also written to a daily rotated file in this directory.
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub watcher: WatcherConfig,
    pub claim_loop: ClaimLoopConfig,
    pub gcal: GcalConfig,
    pub logging: LoggingConfig,
}
