use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Reasons a loaded configuration is rejected before the watcher starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("capture region must have a non-zero width and height")]
    EmptyCaptureRegion,
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
    #[error("reply text must not be empty")]
    EmptyReply,
    #[error("poll interval must be at least one second")]
    ZeroPollInterval,
    #[error("at least one cancellation phrase or verb and topic word pair is required")]
    NoPhrases,
    #[error("calendar id must not be empty")]
    EmptyCalendarId,
}

impl ConfigValidationError {
    /// Config path of the offending value.
    pub fn config_path(&self) -> &'static str {
        match self {
            Self::EmptyCaptureRegion => "watcher.capture",
            Self::UnknownTimeZone(_) => "gcal.time_zone",
            Self::EmptyReply => "watcher.reply_text",
            Self::ZeroPollInterval => "claim_loop.poll_interval_secs",
            Self::NoPhrases => "claim_loop.phrases",
            Self::EmptyCalendarId => "gcal.calendar_id",
        }
    }

    /// The error plus where to fix it, e.g. "... (gcal.time_zone, or set
    /// SHIFTCLAIM__GCAL__TIME_ZONE)".
    pub fn with_hint(&self) -> String {
        format!(
            "{} ({}, or set {})",
            self,
            self.config_path(),
            env_vars::config_path_to_env_var(self.config_path())
        )
    }
}

impl AppConfig {
    /// Checks the values the watcher cannot run without.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let capture = &self.watcher.capture;
        if capture.width == 0 || capture.height == 0 {
            return Err(ConfigValidationError::EmptyCaptureRegion);
        }
        if self.gcal.time_zone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigValidationError::UnknownTimeZone(
                self.gcal.time_zone.clone(),
            ));
        }
        if self.watcher.reply_text.trim().is_empty() {
            return Err(ConfigValidationError::EmptyReply);
        }
        if self.claim_loop.poll_interval_secs == 0 {
            return Err(ConfigValidationError::ZeroPollInterval);
        }
        let blank = |words: &[String]| words.iter().all(|w| w.trim().is_empty());
        let claim_loop = &self.claim_loop;
        if blank(&claim_loop.phrases)
            && (blank(&claim_loop.cancel_verbs) || blank(&claim_loop.topic_words))
        {
            return Err(ConfigValidationError::NoPhrases);
        }
        if self.gcal.calendar_id.trim().is_empty() {
            return Err(ConfigValidationError::EmptyCalendarId);
        }
        Ok(())
    }

    /// The configured zone, parsed. Call after [`AppConfig::validate`].
    pub fn time_zone(&self) -> Result<chrono_tz::Tz, ConfigValidationError> {
        self.gcal
            .time_zone
            .parse()
            .map_err(|_| ConfigValidationError::UnknownTimeZone(self.gcal.time_zone.clone()))
    }
}

/// Directory holding `default.*` and `{RUN_ENV}.*` config files.
fn config_dir() -> PathBuf {
    env::var("SHIFTCLAIM_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"))
}

/// Loads configuration from built-in defaults, optional config files and the
/// environment, then validates it.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();

    let dir = config_dir();
    let default_path = dir.join("default");
    let env_path = dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let mut environment = Environment::with_prefix(&prefix)
        .separator(env_vars::CONFIG_SEPARATOR)
        .list_separator(env_vars::LIST_SEPARATOR)
        .try_parsing(true);
    for key in env_vars::LIST_KEYS {
        environment = environment.with_list_parse_key(key);
    }

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(environment);

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config
        .validate()
        .map_err(|err| ConfigError::Message(err.with_hint()))?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, else the first command line
/// argument if it starts with `.env`, else `.env`. Loading happens once per
/// process; the chosen path is returned.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
