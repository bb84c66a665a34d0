//! Runtime configuration read from the environment (and `.env` via dotenvy)

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Defaults
/// ---------------------------------------------------------------------------

const DEFAULT_REPLY_DELAY_MS: u64 = 2000;
const DEFAULT_SELECTION_DELAY_MS: u64 = 4000;
const DEFAULT_WELCOME_TYPING_MS: u64 = 1000;
const DEFAULT_WELCOME_SETTLE_MS: u64 = 500;
const DEFAULT_INITIAL_SETTLE_MS: u64 = 500;
const DEFAULT_ONBOARDING_SETUP_MS: u64 = 2000;
const DEFAULT_LOG_DIRECTIVES: &str = "info";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value:?}")]
  InvalidValue { key: String, value: String },
}

/// Delays used to pace assistant messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
  /// Typing indicator before a classified reply
  pub reply_delay: Duration,
  /// Typing indicator before confirming an "option N" pick
  pub selection_delay: Duration,
  /// Typing indicator before each welcome message
  pub welcome_typing: Duration,
  /// Pause after each welcome message
  pub welcome_settle: Duration,
  /// Pause after the plan introduction before it counts as shown
  pub initial_settle: Duration,
  /// "We are setting you up..." screen at the end of onboarding
  pub onboarding_setup: Duration,
}

impl Default for PacingConfig {
  fn default() -> Self {
    Self {
      reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
      selection_delay: Duration::from_millis(DEFAULT_SELECTION_DELAY_MS),
      welcome_typing: Duration::from_millis(DEFAULT_WELCOME_TYPING_MS),
      welcome_settle: Duration::from_millis(DEFAULT_WELCOME_SETTLE_MS),
      initial_settle: Duration::from_millis(DEFAULT_INITIAL_SETTLE_MS),
      onboarding_setup: Duration::from_millis(DEFAULT_ONBOARDING_SETUP_MS),
    }
  }
}

impl PacingConfig {
  /// No delays at all, for tests and scripted sessions
  pub fn immediate() -> Self {
    Self {
      reply_delay: Duration::ZERO,
      selection_delay: Duration::ZERO,
      welcome_typing: Duration::ZERO,
      welcome_settle: Duration::ZERO,
      initial_settle: Duration::ZERO,
      onboarding_setup: Duration::ZERO,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
  /// sqlite file for persisted settings; `None` keeps them in memory
  pub db_path: Option<PathBuf>,
  pub pacing: PacingConfig,
  pub log_directives: String,
}

impl Default for CoachConfig {
  fn default() -> Self {
    Self {
      db_path: None,
      pacing: PacingConfig::default(),
      log_directives: DEFAULT_LOG_DIRECTIVES.to_string(),
    }
  }
}

impl CoachConfig {
  /// Build configuration from `COACH_*` environment variables. Call
  /// `dotenvy::dotenv()` first to pick up a `.env` file.
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = PacingConfig::default();
    Ok(Self {
      db_path: env::var("COACH_DB_PATH").ok().filter(|p| !p.is_empty()).map(PathBuf::from),
      pacing: PacingConfig {
        reply_delay: millis_var("COACH_REPLY_DELAY_MS", defaults.reply_delay)?,
        selection_delay: millis_var("COACH_SELECTION_DELAY_MS", defaults.selection_delay)?,
        welcome_typing: millis_var("COACH_WELCOME_TYPING_MS", defaults.welcome_typing)?,
        welcome_settle: millis_var("COACH_WELCOME_SETTLE_MS", defaults.welcome_settle)?,
        initial_settle: millis_var("COACH_INITIAL_SETTLE_MS", defaults.initial_settle)?,
        onboarding_setup: millis_var("COACH_ONBOARDING_SETUP_MS", defaults.onboarding_setup)?,
      },
      log_directives: env::var("COACH_LOG").unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVES.to_string()),
    })
  }

  /// Database URL for `db::initialize_db`
  pub fn database_url(&self) -> String {
    match &self.db_path {
      Some(path) => crate::db::sqlite_url(path),
      None => "sqlite::memory:".to_string(),
    }
  }
}

fn millis_var(key: &str, default: Duration) -> Result<Duration, ConfigError> {
  match env::var(key) {
    Ok(raw) => raw
      .trim()
      .parse::<u64>()
      .map(Duration::from_millis)
      .map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw,
      }),
    Err(_) => Ok(default),
  }
}
