// --- File: crates/shiftclaim_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all ShiftClaim errors.
///
/// Each crate converts its own error enum into this one, so the claim loop
/// only has to look at [`Severity`] to decide whether to keep polling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftClaimError {
    /// Screen capture or text recognition produced nothing usable
    #[error("Recognition failed: {0}")]
    RecognitionError(String),

    /// Data from an external service could not be parsed
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Calendar API unreachable or returned an error
    #[error("Calendar error: {0}")]
    CalendarError(String),

    /// OAuth credentials missing, expired or revoked
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Window focus or keystroke injection failed
    #[error("Automation error: {0}")]
    AutomationError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The reply went out but the calendar write did not
    #[error("Claim incomplete, reply sent but event missing: {0}")]
    IncompleteClaim(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Whether the claim loop may continue after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Log, wait for the next cycle, try again.
    Recoverable,
    /// Stop the loop and exit non-zero.
    Fatal,
}

/// A trait for classifying errors by whether polling can continue.
pub trait Classify {
    fn severity(&self) -> Severity;

    fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl Classify for ShiftClaimError {
    fn severity(&self) -> Severity {
        match self {
            ShiftClaimError::RecognitionError(_) => Severity::Recoverable,
            ShiftClaimError::ParseError(_) => Severity::Recoverable,
            ShiftClaimError::CalendarError(_) => Severity::Recoverable,
            ShiftClaimError::AuthError(_) => Severity::Fatal,
            ShiftClaimError::AutomationError(_) => Severity::Fatal,
            ShiftClaimError::ConfigError(_) => Severity::Fatal,
            // Retrying would type a second reply into the chat.
            ShiftClaimError::IncompleteClaim(_) => Severity::Fatal,
            ShiftClaimError::InternalError(_) => Severity::Fatal,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ShiftClaimError {
    ShiftClaimError::ConfigError(message.to_string())
}

pub fn recognition_error<T: fmt::Display>(message: T) -> ShiftClaimError {
    ShiftClaimError::RecognitionError(message.to_string())
}

pub fn automation_error<T: fmt::Display>(message: T) -> ShiftClaimError {
    ShiftClaimError::AutomationError(message.to_string())
}

pub fn calendar_error<T: fmt::Display>(message: T) -> ShiftClaimError {
    ShiftClaimError::CalendarError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> ShiftClaimError {
    ShiftClaimError::AuthError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> ShiftClaimError {
    ShiftClaimError::InternalError(message.to_string())
}
