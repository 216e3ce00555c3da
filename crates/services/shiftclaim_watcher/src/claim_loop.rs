// --- File: crates/services/shiftclaim_watcher/src/claim_loop.rs ---
//! The polling loop: focus the chat, read it, and claim the first free shift
//! someone gives away.

use crate::context::{ClaimContext, LoopSettings};
use chrono::Utc;
use shiftclaim_common::{
    internal_error, CalendarEntry, ClaimedEvent, Classify, ObservedMessage, ShiftClaimError,
};
use shiftclaim_gcal::logic::{build_claim_event, check_availability};
use shiftclaim_message::extract_time_range;
use std::future::{pending, Future};
use tracing::{debug, error, info, warn};

/// Errors surfaced by the loop, classified through [`Classify`].
pub type ClaimError = ShiftClaimError;

/// Result of one poll cycle that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// No cancellation phrase in the visible text.
    NoMatch,
    /// A phrase matched but no usable time range was found.
    Unparseable,
    /// The range overlaps existing events.
    Busy { conflicts: Vec<CalendarEntry> },
    /// Reply sent and event created.
    Claimed(ClaimedEvent),
}

/// How `run_until` ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopExit {
    Claimed(ClaimedEvent),
    Interrupted,
}

/// Summaries of the conflicting events for the log, e.g. `"Section", "Lab"`.
fn describe_conflicts(conflicts: &[CalendarEntry]) -> String {
    conflicts
        .iter()
        .map(|entry| match entry.summary.trim() {
            "" => "(untitled)".to_string(),
            summary => format!("\"{}\"", summary),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct ClaimLoop {
    context: ClaimContext,
    settings: LoopSettings,
    cycles: u64,
}

impl ClaimLoop {
    pub fn new(context: ClaimContext, settings: LoopSettings) -> Self {
        Self {
            context,
            settings,
            cycles: 0,
        }
    }

    /// Number of poll cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Runs one cycle: focus, read, match, parse, check availability and,
    /// if the slot is free, claim it.
    ///
    /// The claim sends the reply before writing the calendar event. If the
    /// reply went out but the event could not be written the result is
    /// `ShiftClaimError::IncompleteClaim`, which is fatal so the reply is
    /// never sent twice.
    ///
    /// # Errors
    ///
    /// Returns the first error from any collaborator.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, ClaimError> {
        self.cycles += 1;
        let settings = &self.settings;
        let context = &self.context;

        context.window.focus().await?;
        let message = ObservedMessage::new(context.reader.read_text().await?);

        let Some(phrase) = settings.phrases.find(&message) else {
            debug!("Cycle {}: no cancellation phrase", self.cycles);
            return Ok(PollOutcome::NoMatch);
        };
        info!("Cycle {}: matched \"{}\"", self.cycles, phrase);

        let today = context
            .clock
            .now()
            .with_timezone(&settings.time_zone)
            .date_naive();
        let Some(candidate) = extract_time_range(message.normalized(), today) else {
            info!("No time range found in the message, skipping");
            return Ok(PollOutcome::Unparseable);
        };
        let (start, end) = match candidate.localize(&settings.time_zone) {
            Ok((start, end)) => (start.with_timezone(&Utc), end.with_timezone(&Utc)),
            Err(e) => {
                warn!("Discarding \"{}\": {}", candidate.fragment, e);
                return Ok(PollOutcome::Unparseable);
            }
        };
        info!(
            "Candidate shift \"{}\" is {} to {}",
            candidate.fragment, candidate.start, candidate.end
        );

        let slot = check_availability(
            context.calendar.as_ref(),
            &settings.calendar_id,
            start,
            end,
            &settings.time_zone,
        )
        .await?;
        if !slot.is_free() {
            info!(
                "Busy during {}: conflicts with {}",
                candidate.fragment,
                describe_conflicts(&slot.conflicts)
            );
            for conflict in &slot.conflicts {
                debug!("Conflict with event: {:?} ({})", conflict.summary, conflict.event_id);
            }
            return Ok(PollOutcome::Busy {
                conflicts: slot.conflicts,
            });
        }

        let event = build_claim_event(
            &settings.event_summary,
            start,
            end,
            &settings.time_zone,
            message.raw(),
        );
        context.window.send_reply(&settings.reply_text).await?;
        info!("Reply sent, adding {} to the calendar", settings.event_summary);

        let created = match context
            .calendar
            .create_event(&settings.calendar_id, event)
            .await
        {
            Ok(created) => created,
            Err(e) => {
                error!(
                    "Reply was sent but the calendar event for {} to {} was not created: {}",
                    start, end, e
                );
                return Err(ShiftClaimError::IncompleteClaim(format!(
                    "reply sent but event {} to {} not created: {}",
                    start, end, e
                )));
            }
        };

        Ok(PollOutcome::Claimed(ClaimedEvent {
            event_id: created.event_id,
            summary: settings.event_summary.clone(),
            start_time: start,
            end_time: end,
            matched_phrase: phrase.to_string(),
        }))
    }

    /// Polls until a shift is claimed or a fatal error occurs.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error.
    pub async fn run(&mut self) -> Result<ClaimedEvent, ClaimError> {
        match self.run_until(pending::<()>()).await? {
            LoopExit::Claimed(event) => Ok(event),
            LoopExit::Interrupted => Err(internal_error("loop stopped without a shutdown signal")),
        }
    }

    /// Like [`ClaimLoop::run`], but also stops when `shutdown` resolves.
    ///
    /// Shutdown is only observed between cycles, so a cycle that already sent
    /// a reply always gets to write its event.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<LoopExit, ClaimError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            "Watching for cancelled shifts every {:?}",
            self.settings.poll_interval
        );

        loop {
            match self.poll_once().await {
                Ok(PollOutcome::Claimed(event)) => {
                    info!(
                        "Claimed {} from {} to {}",
                        event.summary, event.start_time, event.end_time
                    );
                    return Ok(LoopExit::Claimed(event));
                }
                Ok(outcome) => debug!("Cycle {} ended with {:?}", self.cycles, outcome),
                Err(e) if e.is_fatal() => {
                    error!("Stopping after fatal error: {}", e);
                    return Err(e);
                }
                Err(e) => warn!("Cycle {} failed, retrying: {}", self.cycles, e),
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping after {} cycle(s)", self.cycles);
                    return Ok(LoopExit::Interrupted);
                }
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }
    }
}
