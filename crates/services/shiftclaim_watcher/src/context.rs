// --- File: crates/services/shiftclaim_watcher/src/context.rs ---
//! The service handles one poll cycle talks to.

use chrono_tz::Tz;
use shiftclaim_common::services::{ChatWindow, Clock, DynCalendarService, ScreenReader};
use shiftclaim_common::{config_error, ShiftClaimError};
use shiftclaim_config::AppConfig;
use shiftclaim_message::PhraseMatcher;
use std::sync::Arc;
use std::time::Duration;

/// Every collaborator the loop needs, passed in explicitly so tests can swap
/// any of them for a fake.
#[derive(Clone)]
pub struct ClaimContext {
    pub window: Arc<dyn ChatWindow>,
    pub reader: Arc<dyn ScreenReader>,
    pub calendar: DynCalendarService,
    pub clock: Arc<dyn Clock>,
}

/// What the loop looks for and how it answers.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub phrases: PhraseMatcher,
    pub poll_interval: Duration,
    pub reply_text: String,
    pub calendar_id: String,
    pub event_summary: String,
    pub time_zone: Tz,
}

fn phrase_matcher(config: &AppConfig) -> PhraseMatcher {
    let claim_loop = &config.claim_loop;
    PhraseMatcher::new(&claim_loop.phrases)
        .with_keywords(&claim_loop.cancel_verbs, &claim_loop.topic_words)
}

impl LoopSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ShiftClaimError> {
        let time_zone = config.time_zone().map_err(config_error)?;
        Ok(Self {
            phrases: phrase_matcher(config),
            poll_interval: Duration::from_secs(config.claim_loop.poll_interval_secs),
            reply_text: config.watcher.reply_text.clone(),
            calendar_id: config.gcal.calendar_id.clone(),
            event_summary: config.gcal.event_summary.clone(),
            time_zone,
        })
    }
}

impl Default for LoopSettings {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            phrases: phrase_matcher(&config),
            poll_interval: Duration::from_secs(config.claim_loop.poll_interval_secs),
            reply_text: config.watcher.reply_text,
            calendar_id: config.gcal.calendar_id,
            event_summary: config.gcal.event_summary,
            time_zone: chrono_tz::America::New_York,
        }
    }
}
