use reqwest::Url;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_EXAM_API_URL: &str = "https://egzaminy.uke.gov.pl/netpar/exams.json";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_SEARCH_KEYWORD: &str = "GDYNIA";
pub const DEFAULT_CHECK_INTERVAL_MINUTES: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// One week.
pub const MAX_CHECK_INTERVAL_MINUTES: u64 = 7 * 24 * 60;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must be an integer between 1 and {max}, got {value:?}")]
    InvalidNumber {
        key: &'static str,
        value: String,
        max: u64,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub exam_api: ExamApiConfig,
    pub telegram: TelegramConfig,
    pub schedule: ScheduleConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone)]
pub struct ExamApiConfig {
    pub base_url: Url,
    pub search_keyword: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_url: Url,
    pub credentials: Option<TelegramCredentials>,
}

/// Bot token and destination chat. Only present when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub check_interval_minutes: u64,
}

#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = parse_url(
            "EXAM_API_URL",
            get("EXAM_API_URL").unwrap_or_else(|| DEFAULT_EXAM_API_URL.to_string()),
        )?;
        let telegram_api_url = parse_url(
            "TELEGRAM_API_URL",
            get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
        )?;

        let credentials = match (get("TELEGRAM_BOT_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramCredentials { bot_token, chat_id }),
            _ => None,
        };

        Ok(Config {
            exam_api: ExamApiConfig {
                base_url,
                search_keyword: get("SEARCH_KEYWORD")
                    .unwrap_or_else(|| DEFAULT_SEARCH_KEYWORD.to_string()),
                request_timeout: Duration::from_secs(parse_positive(
                    "REQUEST_TIMEOUT_SECS",
                    get("REQUEST_TIMEOUT_SECS"),
                    DEFAULT_REQUEST_TIMEOUT_SECS,
                    MAX_REQUEST_TIMEOUT_SECS,
                )?),
            },
            telegram: TelegramConfig {
                api_url: telegram_api_url,
                credentials,
            },
            schedule: ScheduleConfig {
                check_interval_minutes: parse_positive(
                    "CHECK_INTERVAL",
                    get("CHECK_INTERVAL"),
                    DEFAULT_CHECK_INTERVAL_MINUTES,
                    MAX_CHECK_INTERVAL_MINUTES,
                )?,
            },
            monitoring: MonitoringConfig {
                log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            },
        })
    }
}

fn parse_url(key: &'static str, value: String) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|_| ConfigError::InvalidUrl { key, value })
}

fn parse_positive(
    key: &'static str,
    value: Option<String>,
    default: u64,
    max: u64,
) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(n) if (1..=max).contains(&n) => Ok(n),
            _ => Err(ConfigError::InvalidNumber {
                key,
                value: raw,
                max,
            }),
        },
    }
}
