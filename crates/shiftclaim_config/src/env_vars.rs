//! Environment variable handling for the ShiftClaim watcher.
//!
//! Configuration values can be overridden with environment variables named
//! after their config path, e.g. `claim_loop.poll_interval_secs` becomes
//! `SHIFTCLAIM__CLAIM_LOOP__POLL_INTERVAL_SECS`.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SHIFTCLAIM";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Separator used when a list value (e.g. phrases) is given as one variable
pub const LIST_SEPARATOR: &str = ";";

/// Config paths whose environment values are split on [`LIST_SEPARATOR`]
pub const LIST_KEYS: &[&str] = &[
    "claim_loop.phrases",
    "claim_loop.cancel_verbs",
    "claim_loop.topic_words",
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "gcal.calendar_id")
///
/// # Returns
///
/// The environment variable name (e.g., "SHIFTCLAIM__GCAL__CALENDAR_ID")
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}
