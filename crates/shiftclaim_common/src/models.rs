// --- File: crates/shiftclaim_common/src/models.rs ---
//! Data that flows through one poll cycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Text recognised from the latest capture of the chat window.
///
/// Recreated every cycle and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedMessage {
    raw: String,
    normalized: String,
}

impl ObservedMessage {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_text(&raw);
        Self { raw, normalized }
    }

    /// Text exactly as recognised.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased text with whitespace runs (including OCR line breaks)
    /// collapsed to single spaces.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Lowercases, collapses whitespace and straightens curly apostrophes.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .to_lowercase()
}

/// Start or end of an existing calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryTime {
    /// Timed event boundary.
    DateTime(DateTime<Utc>),
    /// All-day event boundary (the end date is exclusive).
    AllDay(NaiveDate),
}

/// An existing event as returned by the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub event_id: String,
    pub summary: String,
    /// "confirmed", "tentative" or "cancelled".
    pub status: String,
    /// Marked "show as free".
    pub transparent: bool,
    pub start: Option<EntryTime>,
    pub end: Option<EntryTime>,
}

/// Read-only view of the events overlapping a candidate interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub conflicts: Vec<CalendarEntry>,
}

impl CalendarSlot {
    pub fn is_free(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Event written to the calendar when a shift is claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub summary: String,
    pub description: Option<String>,
    /// IANA zone recorded on the event so it displays in local time.
    pub time_zone: String,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventResult {
    pub event_id: Option<String>,
    pub status: String,
}

/// The one event a run creates before exiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedEvent {
    pub event_id: Option<String>,
    pub summary: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// The cancellation phrase that triggered the claim.
    pub matched_phrase: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_message_normalizes_ocr_line_breaks() {
        let message = ObservedMessage::new("Hey  Can someone\nCOVER 2 to 4\n\n");
        assert_eq!(message.normalized(), "hey can someone cover 2 to 4");
        assert_eq!(message.raw(), "Hey  Can someone\nCOVER 2 to 4\n\n");
        assert!(!message.is_blank());
        assert!(ObservedMessage::new(" \n\t").is_blank());
    }

    #[test]
    fn test_normalize_text_straightens_apostrophes() {
        assert_eq!(normalize_text("I Can\u{2019}t make my shift"), "i can't make my shift");
    }
}
