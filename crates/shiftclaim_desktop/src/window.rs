// --- File: crates/shiftclaim_desktop/src/window.rs ---
use crate::applescript::{activate_script, run_applescript, typing_script};
use shiftclaim_common::services::{BoxFuture, ChatWindow};
use shiftclaim_common::ShiftClaimError;
use shiftclaim_config::WatcherConfig;
use std::time::Duration;
use tracing::{debug, info};

/// The desktop messaging app, driven through AppleScript.
#[derive(Debug, Clone)]
pub struct MacChatWindow {
    app_name: String,
    focus_settle: Duration,
    pre_typing_delay: Duration,
    keystroke_interval: Duration,
}

impl MacChatWindow {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::from_config(&WatcherConfig {
            app_name: app_name.into(),
            ..WatcherConfig::default()
        })
    }

    pub fn from_config(config: &WatcherConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            focus_settle: Duration::from_millis(config.focus_settle_ms),
            pre_typing_delay: Duration::from_millis(config.pre_typing_delay_ms),
            keystroke_interval: Duration::from_millis(config.keystroke_interval_ms),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

impl ChatWindow for MacChatWindow {
    fn focus(&self) -> BoxFuture<'_, (), ShiftClaimError> {
        Box::pin(async move {
            run_applescript(&activate_script(&self.app_name)).await?;
            debug!("Activated {}, settling for {:?}", self.app_name, self.focus_settle);
            tokio::time::sleep(self.focus_settle).await;
            Ok(())
        })
    }

    fn send_reply(&self, text: &str) -> BoxFuture<'_, (), ShiftClaimError> {
        let script = typing_script(text, self.keystroke_interval);
        let length = text.chars().count();
        Box::pin(async move {
            tokio::time::sleep(self.pre_typing_delay).await;
            run_applescript(&script).await?;
            info!("Typed a {}-character reply into {}", length, self.app_name);
            Ok(())
        })
    }
}
