#[cfg(test)]
mod tests {
    use crate::logic::{find_conflicts, overlaps};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use chrono_tz::America::New_York;
    use proptest::prelude::*;
    use shiftclaim_common::{CalendarEntry, EntryTime};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap()
    }

    fn entry(start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEntry {
        CalendarEntry {
            event_id: "e".to_string(),
            summary: "e".to_string(),
            status: "confirmed".to_string(),
            transparent: false,
            start: Some(EntryTime::DateTime(start)),
            end: Some(EntryTime::DateTime(end)),
        }
    }

    proptest! {
        // Overlap does not depend on argument order
        #[test]
        fn test_overlap_is_symmetric(
            a_start in 0i64..600,
            a_len in 1i64..240,
            b_start in 0i64..600,
            b_len in 1i64..240,
        ) {
            let a0 = base() + Duration::minutes(a_start);
            let a1 = a0 + Duration::minutes(a_len);
            let b0 = base() + Duration::minutes(b_start);
            let b1 = b0 + Duration::minutes(b_len);
            prop_assert_eq!(overlaps(a0, a1, b0, b1), overlaps(b0, b1, a0, a1));
        }

        // An event ending before the range starts never conflicts
        #[test]
        fn test_earlier_events_never_conflict(
            gap in 0i64..600,
            len in 1i64..240,
            range_len in 1i64..240,
        ) {
            let range_start = base();
            let range_end = range_start + Duration::minutes(range_len);
            let event_end = range_start - Duration::minutes(gap);
            let event_start = event_end - Duration::minutes(len);
            let conflicts = find_conflicts(
                &[entry(event_start, event_end)],
                range_start,
                range_end,
                &New_York,
            );
            prop_assert!(conflicts.is_empty());
        }

        // An event containing the range always conflicts
        #[test]
        fn test_containing_events_always_conflict(
            before in 0i64..240,
            after in 0i64..240,
            range_len in 1i64..240,
        ) {
            let range_start = base();
            let range_end = range_start + Duration::minutes(range_len);
            let conflicts = find_conflicts(
                &[entry(
                    range_start - Duration::minutes(before),
                    range_end + Duration::minutes(after),
                )],
                range_start,
                range_end,
                &New_York,
            );
            prop_assert_eq!(conflicts.len(), 1);
        }
    }
}
