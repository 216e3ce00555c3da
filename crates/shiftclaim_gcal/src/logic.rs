// --- File: crates/shiftclaim_gcal/src/logic.rs ---
//! Availability checks against the calendar.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use shiftclaim_common::services::CalendarService;
use shiftclaim_common::{CalendarEntry, CalendarEvent, CalendarSlot, EntryTime};
use tracing::debug;

const CANCELLED: &str = "cancelled";

/// Start of `date` in `zone`, as UTC.
fn start_of_day(date: NaiveDate, zone: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // A zone may skip midnight on DST days; the first instant of the day then
    // comes an hour later.
    zone.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            zone.from_local_datetime(&(midnight + chrono::Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

fn boundary(time: &EntryTime, zone: &Tz) -> DateTime<Utc> {
    match time {
        EntryTime::DateTime(dt) => *dt,
        EntryTime::AllDay(date) => start_of_day(*date, zone),
    }
}

/// The UTC interval an entry occupies, or `None` for entries without both
/// boundaries.
///
/// All-day entries cover their dates from local midnight; their end date is
/// exclusive.
pub fn entry_interval(entry: &CalendarEntry, zone: &Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = boundary(entry.start.as_ref()?, zone);
    let end = boundary(entry.end.as_ref()?, zone);
    Some((start, end))
}

/// Half-open interval overlap.
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    other_start: DateTime<Utc>,
    other_end: DateTime<Utc>,
) -> bool {
    start < other_end && end > other_start
}

/// True if the entry makes the user busy at all.
pub fn blocks_time(entry: &CalendarEntry) -> bool {
    entry.status != CANCELLED && !entry.transparent
}

/// Entries that block any part of `[start, end)`.
pub fn find_conflicts(
    entries: &[CalendarEntry],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    zone: &Tz,
) -> Vec<CalendarEntry> {
    entries
        .iter()
        .filter(|entry| blocks_time(entry))
        .filter(|entry| match entry_interval(entry, zone) {
            Some((entry_start, entry_end)) => overlaps(start, end, entry_start, entry_end),
            None => false,
        })
        .cloned()
        .collect()
}

/// Queries the calendar and reports which events block `[start, end)`.
///
/// # Errors
///
/// Propagates the service's error unchanged.
pub async fn check_availability<S>(
    service: &S,
    calendar_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    zone: &Tz,
) -> Result<CalendarSlot, S::Error>
where
    S: CalendarService + ?Sized,
{
    let entries = service.list_events(calendar_id, start, end).await?;
    let conflicts = find_conflicts(&entries, start, end, zone);
    debug!(
        "{} of {} listed event(s) conflict with {} - {}",
        conflicts.len(),
        entries.len(),
        start,
        end
    );
    Ok(CalendarSlot {
        start,
        end,
        conflicts,
    })
}

/// The event written when a shift is claimed.
pub fn build_claim_event(
    summary: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    zone: &Tz,
    source_text: &str,
) -> CalendarEvent {
    CalendarEvent {
        start_time: start,
        end_time: end,
        summary: summary.to_string(),
        description: Some(format!("Claimed from chat message: {}", source_text.trim())),
        time_zone: zone.name().to_string(),
    }
}
