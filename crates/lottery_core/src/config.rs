//! Runtime configuration, read once at startup and passed down explicitly.

use std::time::Duration;

use crate::draw::{BALL_COUNT, DEFAULT_MAX_NUMBER, MAX_BALL_NUMBER};
use crate::service::RANDOM_ORG_ENDPOINT;

pub const API_KEY_ENV: &str = "RANDOM_ORG_API_KEY";
pub const ENDPOINT_ENV: &str = "RANDOM_LOTTERY_ENDPOINT";
pub const TIMEOUT_ENV: &str = "RANDOM_LOTTERY_TIMEOUT_SECS";
pub const DEFAULT_MAX_ENV: &str = "RANDOM_LOTTERY_DEFAULT_MAX";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
    /// Slider position the window opens with.
    pub default_max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingApiKey,
    InvalidTimeout(String),
    InvalidEndpoint(String),
    InvalidDefaultMax(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingApiKey => write!(f, "{API_KEY_ENV} is not set"),
            ConfigError::InvalidTimeout(value) => write!(
                f,
                "{TIMEOUT_ENV} must be a positive number of seconds, got '{value}'"
            ),
            ConfigError::InvalidEndpoint(value) => {
                write!(f, "{ENDPOINT_ENV} must be an http(s) URL, got '{value}'")
            }
            ConfigError::InvalidDefaultMax(value) => write!(
                f,
                "{DEFAULT_MAX_ENV} must be between {BALL_COUNT} and {MAX_BALL_NUMBER}, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl LotteryConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            endpoint: RANDOM_ORG_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_max: DEFAULT_MAX_NUMBER,
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
        }
        self.endpoint = endpoint.to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn with_default_max(mut self, max: u32) -> Result<Self, ConfigError> {
        if !(BALL_COUNT as u32..=MAX_BALL_NUMBER).contains(&max) {
            return Err(ConfigError::InvalidDefaultMax(max.to_string()));
        }
        self.default_max = max;
        Ok(self)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(API_KEY_ENV).unwrap_or_default())?;
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|value| !value.trim().is_empty()) {
            config = config.with_endpoint(&endpoint)?;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|value| !value.trim().is_empty()) {
            config = config.with_timeout(parse_timeout_secs(&raw)?)?;
        }
        if let Some(raw) = lookup(DEFAULT_MAX_ENV).filter(|value| !value.trim().is_empty()) {
            let max = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidDefaultMax(raw.clone()))?;
            config = config.with_default_max(max)?;
        }
        Ok(config)
    }
}

pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
