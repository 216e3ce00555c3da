// --- File: crates/shiftclaim_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use chrono::{DateTime, Utc};
use google_calendar3::api::{Event, EventDateTime, Scope};
use shiftclaim_common::services::{BoxFuture, CalendarService};
use shiftclaim_common::{
    auth_error, calendar_error, config_error, CalendarEntry, CalendarEvent, CalendarEventResult,
    EntryTime, ShiftClaimError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::HubType;

/// Default number of events fetched per availability check.
pub const DEFAULT_MAX_RESULTS: i32 = 10;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
    #[error("Client secret not readable at {path}: {message}")]
    MissingClientSecret { path: String, message: String },
    #[error("OAuth setup failed: {0}")]
    AuthSetup(String),
}

impl GcalServiceError {
    /// True when the failure needs the user to re-authorise rather than a retry.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            GcalServiceError::ApiError(err) => is_auth_api_error(err),
            GcalServiceError::MissingClientSecret { .. } | GcalServiceError::AuthSetup(_) => true,
            _ => false,
        }
    }
}

/// 403 reasons that mean "slow down" rather than "not allowed".
const QUOTA_REASONS: &[&str] = &[
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "quotaExceeded",
    "dailyLimitExceeded",
];

fn is_quota_reason(reason: &str) -> bool {
    QUOTA_REASONS.contains(&reason)
}

fn is_auth_api_error(err: &google_calendar3::Error) -> bool {
    match err {
        google_calendar3::Error::MissingToken(_) => true,
        google_calendar3::Error::BadRequest(body) => {
            let code = body.pointer("/error/code").and_then(|c| c.as_u64());
            let reason = body
                .pointer("/error/errors/0/reason")
                .and_then(|r| r.as_str())
                .unwrap_or_default();
            // 403 is also used for quota errors, which clear up by themselves
            match code {
                Some(401) => true,
                Some(403) => !is_quota_reason(reason),
                _ => false,
            }
        }
        google_calendar3::Error::Failure(response) => response.status().as_u16() == 401,
        _ => false,
    }
}

impl From<GcalServiceError> for ShiftClaimError {
    fn from(err: GcalServiceError) -> Self {
        match &err {
            GcalServiceError::MissingClientSecret { .. } => config_error(err),
            GcalServiceError::TimeParseError(_) => ShiftClaimError::ParseError(err.to_string()),
            _ if err.is_auth_failure() => auth_error(err),
            _ => calendar_error(err),
        }
    }
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
    max_results: i32,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self {
            calendar_hub,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Limit the number of events fetched per availability check.
    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = max_results.max(1);
        self
    }
}

/// Converts an API event boundary into an [`EntryTime`].
pub(crate) fn entry_time(value: Option<EventDateTime>) -> Option<EntryTime> {
    let value = value?;
    match (value.date_time, value.date) {
        (Some(dt), _) => Some(EntryTime::DateTime(dt)),
        (None, Some(date)) => Some(EntryTime::AllDay(date)),
        (None, None) => None,
    }
}

/// Converts an API event into the calendar-agnostic [`CalendarEntry`].
pub(crate) fn to_entry(event: Event) -> CalendarEntry {
    CalendarEntry {
        event_id: event.id.unwrap_or_default(),
        summary: event.summary.unwrap_or_else(|| "No Title".to_string()),
        status: event.status.unwrap_or_else(|| "confirmed".to_string()),
        transparent: event.transparency.as_deref() == Some("transparent"),
        start: entry_time(event.start),
        end: entry_time(event.end),
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Lists the events on `calendar_id` that overlap the given range.
    ///
    /// Recurring events are expanded into single instances and ordered by
    /// start time; at most `max_results` events are fetched.
    ///
    /// # Errors
    ///
    /// Returns a `GcalServiceError` if the range is empty or the API call fails.
    fn list_events(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEntry>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();
        let max_results = self.max_results;

        Box::pin(async move {
            if end_time <= start_time {
                return Err(GcalServiceError::CalculationError(
                    "End time must be after start time".to_string(),
                ));
            }

            let (_response, events) = calendar_hub
                .events()
                .list(&calendar_id)
                .time_min(start_time)
                .time_max(end_time)
                .single_events(true) // Expand recurring events
                .order_by("startTime")
                .max_results(max_results)
                .add_scope(Scope::Full)
                .doit()
                .await?;

            let entries: Vec<CalendarEntry> = events
                .items
                .unwrap_or_default()
                .into_iter()
                .map(to_entry)
                .collect();
            debug!(
                "Calendar {} has {} event(s) between {} and {}",
                calendar_id,
                entries.len(),
                start_time,
                end_time
            );
            Ok(entries)
        })
    }

    /// Inserts a new event into `calendar_id`.
    ///
    /// # Errors
    ///
    /// Returns a `GcalServiceError` if the end is not after the start or the
    /// API call fails.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            if event.end_time <= event.start_time {
                return Err(GcalServiceError::CalculationError(
                    "End time must be after start time".to_string(),
                ));
            }

            let new_event = Event {
                summary: Some(event.summary),
                description: event.description,
                start: Some(EventDateTime {
                    date_time: Some(event.start_time),
                    time_zone: Some(event.time_zone.clone()),
                    ..Default::default()
                }),
                end: Some(EventDateTime {
                    date_time: Some(event.end_time),
                    time_zone: Some(event.time_zone),
                    ..Default::default()
                }),
                ..Default::default()
            };

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .add_scope(Scope::Full)
                .doit()
                .await?;

            info!("Created calendar event {:?}", created_event.id);
            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event.status.unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

/// In-memory implementation of CalendarService for testing.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        entries: Vec<CalendarEntry>,
        created: Vec<CalendarEvent>,
        list_calls: usize,
        fail_next_list: Option<String>,
        fail_next_create: Option<String>,
    }

    /// Mock calendar service for testing.
    ///
    /// Holds a single calendar; the calendar id argument is ignored.
    #[derive(Default)]
    pub struct MockCalendarService {
        state: Mutex<MockState>,
    }

    impl MockCalendarService {
        /// Create a new, empty mock calendar service.
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock calendar that already holds `entries`.
        pub fn with_entries(entries: Vec<CalendarEntry>) -> Self {
            let service = Self::new();
            service.lock().entries = entries;
            service
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Adds a timed, confirmed event.
        pub fn add_event(&self, summary: &str, start: DateTime<Utc>, end: DateTime<Utc>) {
            self.lock().entries.push(CalendarEntry {
                event_id: format!("mock-event-{}", uuid::Uuid::new_v4()),
                summary: summary.to_string(),
                status: "confirmed".to_string(),
                transparent: false,
                start: Some(EntryTime::DateTime(start)),
                end: Some(EntryTime::DateTime(end)),
            });
        }

        /// Events created through `create_event`.
        pub fn created_events(&self) -> Vec<CalendarEvent> {
            self.lock().created.clone()
        }

        /// Number of `list_events` calls so far.
        pub fn list_calls(&self) -> usize {
            self.lock().list_calls
        }

        /// Make the next `list_events` call fail with a calculation error.
        pub fn fail_next_list(&self, message: &str) {
            self.lock().fail_next_list = Some(message.to_string());
        }

        /// Make the next `create_event` call fail with a calculation error.
        pub fn fail_next_create(&self, message: &str) {
            self.lock().fail_next_create = Some(message.to_string());
        }
    }

    fn day_bounds(time: &EntryTime) -> DateTime<Utc> {
        match time {
            EntryTime::DateTime(dt) => *dt,
            EntryTime::AllDay(date) => date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }

    impl CalendarService for MockCalendarService {
        type Error = GcalServiceError;

        fn list_events(
            &self,
            _calendar_id: &str,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> BoxFuture<'_, Vec<CalendarEntry>, Self::Error> {
            Box::pin(async move {
                let mut state = self.lock();
                state.list_calls += 1;
                if let Some(message) = state.fail_next_list.take() {
                    return Err(GcalServiceError::CalculationError(message));
                }

                let mut entries: Vec<CalendarEntry> = state
                    .entries
                    .iter()
                    .filter(|entry| match (&entry.start, &entry.end) {
                        // All-day bounds are compared in UTC; the mock does not
                        // need zone precision for its queries.
                        (Some(start), Some(end)) => {
                            let (entry_start, entry_end) = (day_bounds(start), day_bounds(end));
                            entry_start < end_time && entry_end > start_time
                        }
                        _ => false,
                    })
                    .cloned()
                    .collect();
                entries.sort_by_key(|entry| entry.start.as_ref().map(day_bounds));
                Ok(entries)
            })
        }

        fn create_event(
            &self,
            _calendar_id: &str,
            event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            Box::pin(async move {
                let mut state = self.lock();
                if let Some(message) = state.fail_next_create.take() {
                    return Err(GcalServiceError::CalculationError(message));
                }
                if event.end_time <= event.start_time {
                    return Err(GcalServiceError::CalculationError(
                        "End time must be after start time".to_string(),
                    ));
                }

                let event_id = format!("mock-event-{}", uuid::Uuid::new_v4());
                state.entries.push(CalendarEntry {
                    event_id: event_id.clone(),
                    summary: event.summary.clone(),
                    status: "confirmed".to_string(),
                    transparent: false,
                    start: Some(EntryTime::DateTime(event.start_time)),
                    end: Some(EntryTime::DateTime(event.end_time)),
                });
                state.created.push(event);

                Ok(CalendarEventResult {
                    event_id: Some(event_id),
                    status: "confirmed".to_string(),
                })
            })
        }
    }
}
