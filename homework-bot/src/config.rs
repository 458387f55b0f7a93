use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::poller::CursorPolicy;
use crate::practicum::DEFAULT_ENDPOINT;
use crate::telegram::DEFAULT_API_URL;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Default pause between poll cycles.
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("required environment variables are missing: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    /// Review API endpoint, overridable for staging or tests.
    pub practicum_endpoint: String,
    /// Telegram Bot API base URL.
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub cursor_policy: CursorPolicy,
    pub recording_enabled: bool,
    pub recording_log_path: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"[REDACTED]")
            .field("telegram_token", &"[REDACTED]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("cursor_policy", &self.cursor_policy)
            .field("recording_enabled", &self.recording_enabled)
            .field("recording_log_path", &self.recording_log_path)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// All three credentials are checked before returning, so a
    /// `ConfigError::Missing` names every absent variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let practicum_token = parse_required(lookup(PRACTICUM_TOKEN));
        let telegram_token = parse_required(lookup(TELEGRAM_TOKEN));
        let telegram_chat_id = parse_required(lookup(TELEGRAM_CHAT_ID));

        let (practicum_token, telegram_token, telegram_chat_id) =
            match (practicum_token, telegram_token, telegram_chat_id) {
                (Some(a), Some(b), Some(c)) => (a, b, c),
                (a, b, c) => {
                    let missing = [
                        (PRACTICUM_TOKEN, a.is_none()),
                        (TELEGRAM_TOKEN, b.is_none()),
                        (TELEGRAM_CHAT_ID, c.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                    return Err(ConfigError::Missing(missing));
                }
            };

        let practicum_endpoint =
            lookup("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let telegram_api_url =
            lookup("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let retry_period = match lookup("RETRY_PERIOD_SECS") {
            Some(value) => parse_retry_period(&value)?,
            None => DEFAULT_RETRY_PERIOD,
        };

        let cursor_policy = if parse_flag("ADVANCE_CURSOR", lookup("ADVANCE_CURSOR"))? {
            CursorPolicy::FollowServer
        } else {
            CursorPolicy::Fixed
        };

        let recording_enabled = parse_flag("RECORDING_ENABLED", lookup("RECORDING_ENABLED"))?;

        let recording_log_path =
            lookup("RECORDING_LOG_PATH").unwrap_or_else(|| "recordings.jsonl".to_string());

        Ok(Config {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            practicum_endpoint,
            telegram_api_url,
            retry_period,
            cursor_policy,
            recording_enabled,
            recording_log_path,
        })
    }
}

/// Treat missing, empty and whitespace-only values as unset.
pub fn parse_required(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_retry_period(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name: "RETRY_PERIOD_SECS",
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            name: "RETRY_PERIOD_SECS",
            reason: e.to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) => v.parse::<bool>().map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
