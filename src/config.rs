//! Process configuration read from the environment.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default review service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default delay between polling cycles.
pub const DEFAULT_RETRY_SECS: u64 = 600;

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
const RETRY_TIME: &str = "RETRY_TIME";
const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";

/// Everything the binary needs before entering the polling loop.
#[derive(Debug)]
pub struct Config {
    /// OAuth token for the review service.
    pub practicum_token: SecretString,
    /// Telegram bot token.
    pub telegram_token: SecretString,
    /// Chat that receives notifications.
    pub chat_id: String,
    /// Review service URL.
    pub endpoint: String,
    /// Delay between polling cycles.
    pub retry_interval: Duration,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as absent. All missing required keys are
    /// reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let practicum_token = get(PRACTICUM_TOKEN);
        let telegram_token = get(TELEGRAM_TOKEN);
        let chat_id = get(TELEGRAM_CHAT_ID);

        let missing: Vec<&'static str> = [
            (PRACTICUM_TOKEN, practicum_token.is_none()),
            (TELEGRAM_TOKEN, telegram_token.is_none()),
            (TELEGRAM_CHAT_ID, chat_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        let (Some(practicum_token), Some(telegram_token), Some(chat_id)) =
            (practicum_token, telegram_token, chat_id)
        else {
            return Err(ConfigError::MissingEnv(missing));
        };

        let retry_interval = match get(RETRY_TIME) {
            Some(raw) => parse_retry(&raw)?,
            None => Duration::from_secs(DEFAULT_RETRY_SECS),
        };

        Ok(Self {
            practicum_token: SecretString::from(practicum_token),
            telegram_token: SecretString::from(telegram_token),
            chat_id,
            endpoint: get(PRACTICUM_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_interval,
        })
    }
}

fn parse_retry(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
        key: RETRY_TIME,
        message: format!("{raw:?} is not a number of seconds: {e}"),
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key: RETRY_TIME,
            message: "interval must be positive".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
