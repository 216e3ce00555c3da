// --- File: crates/shiftclaim_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Data structures and models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    auth_error, automation_error, calendar_error, config_error, internal_error,
    recognition_error, Classify, Severity, ShiftClaimError,
};

pub use models::{
    CalendarEntry, CalendarEvent, CalendarEventResult, CalendarSlot, ClaimedEvent, EntryTime,
    ObservedMessage,
};

pub use services::{
    BoxFuture, CalendarService, ChatWindow, ClassifiedCalendarService, Clock, DynCalendarService,
    FixedClock, ScreenReader, SystemClock,
};
