// --- File: crates/shiftclaim_message/src/lib.rs ---
// Declare modules within this crate
pub mod phrases;
pub mod time_range;
#[cfg(test)]
mod time_range_proptest;

pub use phrases::{PhraseMatch, PhraseMatcher};
pub use time_range::{
    extract_time_range, find_time_ranges, infer_meridiem, resolve_day, ClockReading, Meridiem,
    TimeRangeCandidate, TimeRangeError,
};
