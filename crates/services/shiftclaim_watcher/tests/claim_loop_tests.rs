//! End-to-end behaviour of the claim loop against fakes.


use chrono::TimeZone;
use fakes::{local, Harness, ScriptedReader};
use shiftclaim_common::{automation_error, recognition_error, Classify, ShiftClaimError};
use shiftclaim_watcher::{ClaimLoop, LoopExit, LoopSettings, PollOutcome};
use std::time::Duration;

const GIVEAWAY: &str = "hey can someone cover 2 to 4 today, I'm out";

fn claim_loop(harness: &Harness) -> ClaimLoop {
    ClaimLoop::new(harness.context.clone(), LoopSettings::default())
}

#[tokio::test]
async fn test_free_slot_is_claimed_and_loop_ends() {
    let harness = Harness::new(ScriptedReader::always(GIVEAWAY));
    let mut claim_loop = claim_loop(&harness);

    let claimed = claim_loop.run().await.unwrap();

    assert_eq!(claimed.start_time, local(5, 14));
    assert_eq!(claimed.end_time, local(5, 16));
    assert_eq!(claimed.summary, "TA Office Hours (Covered)");
    assert_eq!(claimed.matched_phrase, "can someone cover");
    assert!(claimed.event_id.is_some());

    assert_eq!(harness.window.replies(), vec!["I'm free, I can take over!"]);
    let created = harness.mock().created_events();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].start_time, local(5, 14));
    assert_eq!(created[0].end_time, local(5, 16));
    assert_eq!(created[0].time_zone, "America/New_York");
    assert_eq!(claim_loop.cycles(), 1);
}

#[tokio::test]
async fn test_verb_and_topic_wording_is_claimed() {
    let harness = Harness::new(ScriptedReader::always("Canceling office hours today 2-4, sorry!"));
    let mut claim_loop = claim_loop(&harness);

    let claimed = claim_loop.run().await.unwrap();

    assert_eq!(claimed.matched_phrase, "cancel + office hours");
    assert_eq!(claimed.start_time, local(5, 14));
    assert_eq!(claimed.end_time, local(5, 16));
    assert_eq!(harness.mock().created_events().len(), 1);
}

#[tokio::test]
async fn test_weekday_banner_above_the_message_is_ignored() {
    let capture = "THURSDAY\njane: see you all then\nalex: can someone cover 2 to 4, I'm out";
    let harness = Harness::new(ScriptedReader::always(capture));
    let mut claim_loop = claim_loop(&harness);

    let claimed = claim_loop.run().await.unwrap();

    assert_eq!(claimed.start_time, local(5, 14));
    assert_eq!(claimed.end_time, local(5, 16));
}

#[tokio::test(start_paused = true)]
async fn test_busy_slot_keeps_polling_every_ten_seconds() {
    let harness = Harness::new(ScriptedReader::always(GIVEAWAY));
    harness.mock().add_event("Section", local(5, 13), local(5, 15));
    let mut claim_loop = claim_loop(&harness);

    let started = tokio::time::Instant::now();
    let exit = claim_loop
        .run_until(tokio::time::sleep(Duration::from_secs(25)))
        .await
        .unwrap();

    assert_eq!(exit, LoopExit::Interrupted);
    assert_eq!(started.elapsed(), Duration::from_secs(25));
    // Polls at 0s, 10s and 20s
    assert_eq!(claim_loop.cycles(), 3);
    assert_eq!(harness.mock().list_calls(), 3);
    assert!(harness.window.replies().is_empty());
    assert!(harness.mock().created_events().is_empty());
}

#[tokio::test]
async fn test_busy_outcome_lists_conflicts() {
    let harness = Harness::new(ScriptedReader::always(GIVEAWAY));
    harness.mock().add_event("Section", local(5, 13), local(5, 15));
    let mut claim_loop = claim_loop(&harness);

    match claim_loop.poll_once().await.unwrap() {
        PollOutcome::Busy { conflicts } => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].summary, "Section");
        }
        other => panic!("expected Busy, got {:?}", other),
    }
}

#[tokio::test]
async fn test_message_without_phrase_is_ignored() {
    let harness = Harness::new(ScriptedReader::always("see you all at 2 to 4 today"));
    let mut claim_loop = claim_loop(&harness);

    assert_eq!(claim_loop.poll_once().await.unwrap(), PollOutcome::NoMatch);
    assert_eq!(harness.mock().list_calls(), 0);
    assert!(harness.window.replies().is_empty());
}

#[tokio::test]
async fn test_unparseable_time_makes_no_calendar_query() {
    let harness = Harness::new(ScriptedReader::always("can someone cover my shift later?"));
    let mut claim_loop = claim_loop(&harness);

    assert_eq!(claim_loop.poll_once().await.unwrap(), PollOutcome::Unparseable);
    assert_eq!(harness.mock().list_calls(), 0);
    assert!(harness.window.replies().is_empty());
    assert!(harness.mock().created_events().is_empty());
}

#[tokio::test]
async fn test_phrase_split_across_ocr_lines_still_matches() {
    let harness = Harness::new(ScriptedReader::always("Can someone\nCOVER 9-11 tomorrow"));
    let mut claim_loop = claim_loop(&harness);

    match claim_loop.poll_once().await.unwrap() {
        PollOutcome::Claimed(event) => {
            assert_eq!(event.start_time, local(6, 9));
            assert_eq!(event.end_time, local(6, 11));
        }
        other => panic!("expected Claimed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_skipped_local_time_is_discarded() {
    // 2025-03-09 in New York has no 2:00-3:00
    let dst_morning = chrono_tz::America::New_York
        .with_ymd_and_hms(2025, 3, 9, 9, 0, 0)
        .unwrap()
        .with_timezone(&chrono::Utc);
    let harness = Harness::at(
        ScriptedReader::always("need someone for 2am to 4am"),
        dst_morning,
    );
    let mut claim_loop = claim_loop(&harness);

    assert_eq!(claim_loop.poll_once().await.unwrap(), PollOutcome::Unparseable);
    assert_eq!(harness.mock().list_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_recognition_failure_is_retried() {
    let reader =
        ScriptedReader::always(GIVEAWAY).then(Err(recognition_error("no text recognised")));
    let harness = Harness::new(reader);
    let mut claim_loop = claim_loop(&harness);

    let claimed = claim_loop.run().await.unwrap();
    assert_eq!(claimed.start_time, local(5, 14));
    assert_eq!(claim_loop.cycles(), 2);
    assert_eq!(harness.reader.reads(), 2);
    assert_eq!(harness.window.replies().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_calendar_outage_is_retried() {
    let harness = Harness::new(ScriptedReader::always(GIVEAWAY));
    harness.mock().fail_next_list("connection reset");
    let mut claim_loop = claim_loop(&harness);

    let started = tokio::time::Instant::now();
    claim_loop.run().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(10));
    assert_eq!(harness.mock().list_calls(), 2);
    assert_eq!(harness.mock().created_events().len(), 1);
}

#[tokio::test]
async fn test_automation_failure_stops_the_loop() {
    let harness = Harness::new(ScriptedReader::always(GIVEAWAY));
    harness
        .window
        .fail_focus(automation_error("WhatsApp is not running"));
    let mut claim_loop = claim_loop(&harness);

    let err = claim_loop.run().await.unwrap_err();
    assert!(matches!(err, ShiftClaimError::AutomationError(_)));
    assert_eq!(claim_loop.cycles(), 1);
    assert_eq!(harness.reader.reads(), 0);
}

#[tokio::test]
async fn test_failed_reply_creates_no_event() {
    let harness = Harness::new(ScriptedReader::always(GIVEAWAY));
    harness
        .window
        .fail_reply(automation_error("not allowed to send keystrokes"));
    let mut claim_loop = claim_loop(&harness);

    let err = claim_loop.run().await.unwrap_err();
    assert!(err.is_fatal());
    assert!(harness.mock().created_events().is_empty());
}

#[tokio::test]
async fn test_failed_event_after_reply_is_fatal() {
    let harness = Harness::new(ScriptedReader::always(GIVEAWAY));
    harness.mock().fail_next_create("quota exceeded");
    let mut claim_loop = claim_loop(&harness);

    let err = claim_loop.run().await.unwrap_err();
    assert!(matches!(err, ShiftClaimError::IncompleteClaim(_)));
    assert!(err.is_fatal());
    // The reply is not repeated
    assert_eq!(harness.window.replies().len(), 1);
    assert!(harness.mock().created_events().is_empty());
}
