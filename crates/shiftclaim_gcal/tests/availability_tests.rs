//! Availability decisions over realistic calendars.


use chrono::NaiveDate;
use chrono_tz::America::New_York;
use fixtures::{all_day, busy, local, teaching_day};
use shiftclaim_gcal::logic::find_conflicts;

#[test]
fn test_gap_in_teaching_day_is_free() {
    let entries = teaching_day();
    assert!(find_conflicts(&entries, local(12, 0), local(13, 0), &New_York).is_empty());
    assert!(find_conflicts(&entries, local(15, 0), local(16, 0), &New_York).is_empty());
}

#[test]
fn test_range_spanning_gap_and_event_is_busy() {
    let entries = teaching_day();
    let conflicts = find_conflicts(&entries, local(14, 0), local(16, 0), &New_York);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].summary, "Section");

    let conflicts = find_conflicts(&entries, local(11, 0), local(17, 0), &New_York);
    assert_eq!(conflicts.len(), 3);
}

#[test]
fn test_multi_day_event_blocks_every_covered_day() {
    let trip = all_day("Conference", NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(), 3);
    assert_eq!(
        find_conflicts(&[trip.clone()], local(14, 0), local(16, 0), &New_York).len(),
        1
    );

    let later = local(14, 0) + chrono::Duration::days(3);
    let after_trip = later + chrono::Duration::hours(2);
    assert!(find_conflicts(&[trip], later, after_trip, &New_York).is_empty());
}

#[test]
fn test_free_marked_event_does_not_block() {
    let mut focus_time = busy("Focus time", 14, 16);
    focus_time.transparent = true;
    assert!(find_conflicts(&[focus_time], local(14, 0), local(16, 0), &New_York).is_empty());
}
