// --- File: crates/services/shiftclaim_watcher/src/service_factory.rs ---
//! Builds the real desktop and calendar services from configuration.

use crate::context::ClaimContext;
use shiftclaim_common::services::{ClassifiedCalendarService, DynCalendarService, SystemClock};
use shiftclaim_common::ShiftClaimError;
use shiftclaim_config::AppConfig;
use shiftclaim_desktop::{MacChatWindow, TesseractScreenReader};
use shiftclaim_gcal::{create_calendar_hub, GoogleCalendarService};
use std::sync::Arc;
use tracing::info;

/// Authorises against Google Calendar and wires up the macOS chat window,
/// screen reader and system clock.
///
/// # Errors
///
/// Fails when the client secret is missing or the OAuth flow cannot be set
/// up; both are fatal.
pub async fn build_context(config: &AppConfig) -> Result<ClaimContext, ShiftClaimError> {
    info!("Initializing Google Calendar service...");
    let hub = create_calendar_hub(&config.gcal).await?;
    let service =
        GoogleCalendarService::new(Arc::new(hub)).with_max_results(config.gcal.max_results);
    let calendar: DynCalendarService = Arc::new(ClassifiedCalendarService::new(service));

    info!(
        "Watching {} through region {:?}",
        config.watcher.app_name, config.watcher.capture
    );
    Ok(ClaimContext {
        window: Arc::new(MacChatWindow::from_config(&config.watcher)),
        reader: Arc::new(TesseractScreenReader::from_config(&config.watcher)),
        calendar,
        clock: Arc::new(SystemClock),
    })
}
