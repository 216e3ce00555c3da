// --- File: crates/shiftclaim_common/src/services.rs ---
//! Service abstractions for the external collaborators.
//!
//! The claim loop only talks to the calendar, the chat window, the screen and
//! the clock through these traits, so tests can substitute in-memory fakes.

use crate::error::ShiftClaimError;
use crate::models::{CalendarEntry, CalendarEvent, CalendarEventResult};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A trait for calendar service operations.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// List events overlapping `[start_time, end_time)`.
    fn list_events(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEntry>, Self::Error>;

    /// Create a calendar event.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// The messaging application window.
pub trait ChatWindow: Send + Sync {
    /// Bring the window to the foreground.
    fn focus(&self) -> BoxFuture<'_, (), ShiftClaimError>;

    /// Type `text` into the focused conversation and send it.
    fn send_reply(&self, text: &str) -> BoxFuture<'_, (), ShiftClaimError>;
}

/// Source of the text currently visible in the chat window.
pub trait ScreenReader: Send + Sync {
    /// Capture the configured region and return the recognised text.
    fn read_text(&self) -> BoxFuture<'_, String, ShiftClaimError>;
}

/// Wall clock, replaceable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// [`Clock`] frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar service behind a trait object, with errors converted to
/// [`ShiftClaimError`] so they can be classified.
pub type DynCalendarService = Arc<dyn CalendarService<Error = ShiftClaimError>>;

/// Wraps any [`CalendarService`] whose error converts into [`ShiftClaimError`].
pub struct ClassifiedCalendarService<S> {
    inner: S,
}

impl<S> ClassifiedCalendarService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> CalendarService for ClassifiedCalendarService<S>
where
    S: CalendarService,
    S::Error: Into<ShiftClaimError>,
{
    type Error = ShiftClaimError;

    fn list_events(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEntry>, Self::Error> {
        let future = self.inner.list_events(calendar_id, start_time, end_time);
        Box::pin(async move { future.await.map_err(Into::into) })
    }

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let future = self.inner.create_event(calendar_id, event);
        Box::pin(async move { future.await.map_err(Into::into) })
    }
}
