//! Extraction of informal time ranges ("2 to 4", "9:30-11", "10-2pm") from
//! chat text, resolved to concrete local timestamps.

use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
    Weekday,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::debug;

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?P<sh>\d{1,2})(?::(?P<sm>\d{2}))?(?:\s*(?P<sp>[ap])\.?m\.?)?\s*(?:to|till|til|until|-|–|—)\s*(?P<eh>\d{1,2})(?::(?P<em>\d{2}))?(?:\s*(?P<ep>[ap])\.?m\.?)?",
    )
    .expect("time range pattern must compile")
});

static DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(today|tonight|tomorrow|tmrw|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .expect("day pattern must compile")
});

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+").expect("word pattern must compile"));

/// Words on either side of a range searched for the day it refers to.
const DAY_CONTEXT_WORDS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    #[error("local time {0} does not exist or is ambiguous in the target zone")]
    UnrepresentableLocalTime(NaiveDateTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_capture(value: &str) -> Self {
        if value.eq_ignore_ascii_case("a") {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    fn flip(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }
}

/// A clock time as written in the message, before AM/PM resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Option<Meridiem>,
}

impl ClockReading {
    fn with_meridiem(&self, meridiem: Meridiem) -> Option<NaiveTime> {
        if !(1..=12).contains(&self.hour) {
            return None;
        }
        let hour = match (meridiem, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
        NaiveTime::from_hms_opt(hour, self.minute, 0)
    }

    /// Working-hours reading of a bare hour: 1-7 afternoon, 8-11 morning,
    /// 12 noon, 0 and 13-23 taken as a 24-hour clock.
    fn assume_working_hours(&self) -> Option<NaiveTime> {
        match self.hour {
            1..=7 => self.with_meridiem(Meridiem::Pm),
            8..=11 => self.with_meridiem(Meridiem::Am),
            _ => NaiveTime::from_hms_opt(self.hour, self.minute, 0),
        }
    }

    fn resolve(&self) -> Option<NaiveTime> {
        match self.meridiem {
            Some(meridiem) => self.with_meridiem(meridiem),
            None => self.assume_working_hours(),
        }
    }
}

/// Resolves AM/PM for a start/end pair.
///
/// Explicit meridiems are kept. A bare start borrows the end's meridiem when
/// that keeps the range ordered, else takes the opposite one. A bare end that
/// lands before the start is moved 12 hours later when that fixes the order.
pub fn infer_meridiem(start: &ClockReading, end: &ClockReading) -> Option<(NaiveTime, NaiveTime)> {
    let mut end_time = end.resolve()?;

    let start_time = match (start.meridiem, end.meridiem) {
        (Some(_), _) => start.resolve()?,
        (None, Some(end_meridiem)) if (1..=12).contains(&start.hour) => {
            let borrowed = start.with_meridiem(end_meridiem)?;
            if borrowed < end_time {
                borrowed
            } else {
                start.with_meridiem(end_meridiem.flip())?
            }
        }
        (None, _) => start.resolve()?,
    };

    if end_time <= start_time && end.meridiem.is_none() && end_time.hour() < 12 {
        end_time = NaiveTime::from_hms_opt(end_time.hour() + 12, end_time.minute(), 0)?;
    }

    if end_time <= start_time {
        return None;
    }
    Some((start_time, end_time))
}

/// A candidate shift interval parsed from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRangeCandidate {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// The part of the message the range was read from.
    pub fragment: String,
}

impl TimeRangeCandidate {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Pins the naive timestamps to `zone`.
    pub fn localize<Z: TimeZone>(
        &self,
        zone: &Z,
    ) -> Result<(DateTime<Z>, DateTime<Z>), TimeRangeError> {
        let start = zone
            .from_local_datetime(&self.start)
            .single()
            .ok_or(TimeRangeError::UnrepresentableLocalTime(self.start))?;
        let end = zone
            .from_local_datetime(&self.end)
            .single()
            .ok_or(TimeRangeError::UnrepresentableLocalTime(self.end))?;
        Ok((start, end))
    }
}

/// A word that closes a sentence or a chat sender label ("alex:").
fn ends_clause(word: &str) -> bool {
    word.ends_with(['.', '!', '?', ':'])
}

/// The words next to the range at `start..end`, stopping at clause
/// boundaries so day words from other messages in the capture are ignored.
fn day_context(text: &str, start: usize, end: usize) -> &str {
    let mut from = start;
    let before: Vec<_> = WORD_RE.find_iter(&text[..start]).collect();
    for word in before.iter().rev().take(DAY_CONTEXT_WORDS) {
        if ends_clause(word.as_str()) {
            break;
        }
        from = word.start();
    }

    let mut to = end;
    for word in WORD_RE.find_iter(&text[end..]).take(DAY_CONTEXT_WORDS) {
        to = end + word.end();
        if ends_clause(word.as_str()) {
            break;
        }
    }
    &text[from..to]
}

/// The day the message refers to: today unless it names "tomorrow" or a
/// weekday, in which case the nearest such day (today included).
pub fn resolve_day(text: &str, today: NaiveDate) -> NaiveDate {
    let Some(word) = DAY_RE.find(text).map(|m| m.as_str().to_lowercase()) else {
        return today;
    };
    match word.as_str() {
        "today" | "tonight" => today,
        "tomorrow" | "tmrw" => today.checked_add_days(Days::new(1)).unwrap_or(today),
        name => match name.parse::<Weekday>() {
            Ok(target) => {
                let ahead = (target.num_days_from_monday() + 7
                    - today.weekday().num_days_from_monday())
                    % 7;
                today
                    .checked_add_days(Days::new(u64::from(ahead)))
                    .unwrap_or(today)
            }
            Err(_) => today,
        },
    }
}

fn reading(caps: &Captures<'_>, hour: &str, minute: &str, meridiem: &str) -> Option<ClockReading> {
    let hour = caps.name(hour)?.as_str().parse::<u32>().ok()?;
    let minute = match caps.name(minute) {
        Some(m) => m.as_str().parse::<u32>().ok()?,
        None => 0,
    };
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(ClockReading {
        hour,
        minute,
        meridiem: caps.name(meridiem).map(|m| Meridiem::from_capture(m.as_str())),
    })
}

/// True when the match is part of a longer number such as a date, a price or
/// a phone number.
fn is_embedded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    if matches!(before, Some('/' | ':' | '$' | '.' | '-')) {
        return true;
    }
    let mut after = text[end..].chars();
    match after.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('/' | ':' | '-') => after.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Every valid time range in `text`, in order of appearance.
///
/// Each range is dated by a day word next to it, or today when there is none.
pub fn find_time_ranges(text: &str, today: NaiveDate) -> Vec<TimeRangeCandidate> {
    let mut candidates = Vec::new();

    for caps in RANGE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if is_embedded(text, whole.start(), whole.end()) {
            debug!("Skipping numeric fragment {:?}", whole.as_str());
            continue;
        }
        let start = reading(&caps, "sh", "sm", "sp");
        let end = reading(&caps, "eh", "em", "ep");
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };
        let day = resolve_day(day_context(text, whole.start(), whole.end()), today);
        match infer_meridiem(&start, &end) {
            Some((start_time, end_time)) => candidates.push(TimeRangeCandidate {
                start: day.and_time(start_time),
                end: day.and_time(end_time),
                fragment: whole.as_str().trim().to_string(),
            }),
            None => debug!("Ignoring reversed or invalid range {:?}", whole.as_str()),
        }
    }
    candidates
}

/// The first valid time range in `text`, dated relative to `today`.
pub fn extract_time_range(text: &str, today: NaiveDate) -> Option<TimeRangeCandidate> {
    find_time_ranges(text, today).into_iter().next()
}
