#[cfg(test)]
mod tests {
    use crate::service::{to_entry, GcalServiceError};
    use chrono::{NaiveDate, TimeZone, Utc};
    use google_calendar3::api::{Event, EventDateTime};
    use serde_json::json;
    use shiftclaim_common::{Classify, EntryTime, Severity, ShiftClaimError};

    fn bad_request(code: u64, reason: &str) -> GcalServiceError {
        GcalServiceError::ApiError(google_calendar3::Error::BadRequest(json!({
            "error": {
                "code": code,
                "message": "request failed",
                "errors": [{ "reason": reason }]
            }
        })))
    }

    #[test]
    fn test_unauthorized_is_auth_error() {
        let err: ShiftClaimError = bad_request(401, "authError").into();
        assert!(matches!(err, ShiftClaimError::AuthError(_)));
        assert_eq!(err.severity(), Severity::Fatal);
    }

    #[test]
    fn test_forbidden_is_auth_error() {
        let err: ShiftClaimError = bad_request(403, "forbidden").into();
        assert!(matches!(err, ShiftClaimError::AuthError(_)));
    }

    #[test]
    fn test_rate_limit_is_recoverable() {
        let err: ShiftClaimError = bad_request(403, "rateLimitExceeded").into();
        assert!(matches!(err, ShiftClaimError::CalendarError(_)));
        assert_eq!(err.severity(), Severity::Recoverable);

        let err: ShiftClaimError = bad_request(403, "userRateLimitExceeded").into();
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_quota_exhaustion_is_recoverable() {
        for reason in ["quotaExceeded", "dailyLimitExceeded"] {
            let err: ShiftClaimError = bad_request(403, reason).into();
            assert!(matches!(err, ShiftClaimError::CalendarError(_)), "{}", reason);
            assert_eq!(err.severity(), Severity::Recoverable);
        }
    }

    #[test]
    fn test_server_errors_are_recoverable() {
        let err: ShiftClaimError = bad_request(503, "backendError").into();
        assert!(matches!(err, ShiftClaimError::CalendarError(_)));

        let err: ShiftClaimError =
            GcalServiceError::ApiError(google_calendar3::Error::Cancelled).into();
        assert_eq!(err.severity(), Severity::Recoverable);
    }

    #[test]
    fn test_setup_errors_are_fatal() {
        let err: ShiftClaimError = GcalServiceError::AuthSetup("token cache locked".into()).into();
        assert!(matches!(err, ShiftClaimError::AuthError(_)));
        assert!(err.is_fatal());

        let err: ShiftClaimError = GcalServiceError::MissingClientSecret {
            path: "credentials.json".into(),
            message: "not found".into(),
        }
        .into();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_calculation_error_is_calendar_error() {
        let err: ShiftClaimError =
            GcalServiceError::CalculationError("End time must be after start time".into()).into();
        assert!(matches!(err, ShiftClaimError::CalendarError(_)));
    }

    #[test]
    fn test_to_entry_maps_timed_event() {
        let start = Utc.with_ymd_and_hms(2025, 5, 5, 17, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 5, 5, 19, 0, 0).unwrap();
        let event = Event {
            id: Some("abc".into()),
            summary: Some("Lab".into()),
            status: Some("confirmed".into()),
            start: Some(EventDateTime {
                date_time: Some(start),
                ..Default::default()
            }),
            end: Some(EventDateTime {
                date_time: Some(end),
                ..Default::default()
            }),
            ..Default::default()
        };

        let entry = to_entry(event);
        assert_eq!(entry.event_id, "abc");
        assert_eq!(entry.summary, "Lab");
        assert!(!entry.transparent);
        assert_eq!(entry.start, Some(EntryTime::DateTime(start)));
        assert_eq!(entry.end, Some(EntryTime::DateTime(end)));
    }

    #[test]
    fn test_to_entry_maps_all_day_transparent_event() {
        let event = Event {
            transparency: Some("transparent".into()),
            start: Some(EventDateTime {
                date: NaiveDate::from_ymd_opt(2025, 5, 5),
                ..Default::default()
            }),
            end: Some(EventDateTime {
                date: NaiveDate::from_ymd_opt(2025, 5, 6),
                ..Default::default()
            }),
            ..Default::default()
        };

        let entry = to_entry(event);
        assert_eq!(entry.summary, "No Title");
        assert_eq!(entry.status, "confirmed");
        assert!(entry.transparent);
        assert_eq!(
            entry.start,
            Some(EntryTime::AllDay(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()))
        );
    }
}
