use std::path::PathBuf;
use std::time::Duration;

use fundboard_connect::DEFAULT_API_BASE_URL;
use fundboard_core::constants::DEFAULT_REQUEST_TIMEOUT_MS;
use fundboard_core::{DateRange, Error, Result};

pub struct Config {
    pub api_base_url: String,
    /// `None` uses the default window ending yesterday.
    pub range: Option<DateRange>,
    pub request_timeout: Duration,
    pub session_cookie: Option<String>,
    /// `None` writes the page to stdout.
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = var("FB_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        let range = match (var("FB_START_DATE"), var("FB_END_DATE")) {
            (Some(start), Some(end)) => Some(DateRange::parse(&start, &end)?),
            (None, None) => None,
            (Some(_), None) => return Err(Error::MissingConfigKey("FB_END_DATE".into())),
            (None, Some(_)) => return Err(Error::MissingConfigKey("FB_START_DATE".into())),
        };

        let timeout_ms = match var("FB_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfigValue(format!("FB_REQUEST_TIMEOUT_MS: {}", raw))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Ok(Self {
            api_base_url,
            range,
            request_timeout: Duration::from_millis(timeout_ms),
            session_cookie: var("FB_SESSION_COOKIE"),
            output: var("FB_OUTPUT").map(PathBuf::from),
        })
    }
}
