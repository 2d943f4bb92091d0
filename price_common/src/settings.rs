//! Process configuration read from the environment once at start-up.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `LOG_LEVEL` | `info` |
//! | `ALPHA_VANTAGE_API_KEY` | unset |
//! | `COIN_GECKO_API_KEY` | unset |
//! | `COIN_GECKO_SUBSCRIPTION` | `FREE` |
//! | `COIN_GECKO_VALIDATE_SYMBOLS` | `false` |
//! | `PRICE_HTTP_TIMEOUT_SECS` | `10` |
use std::time::Duration;

use log::{LevelFilter, warn};

use crate::error::PriceError;
use crate::market::Tier;
use crate::net::DEFAULT_TIMEOUT_SECS;
use crate::result::Result;

/// Log filter level.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Alpha Vantage API key.
pub const ALPHA_VANTAGE_API_KEY: &str = "ALPHA_VANTAGE_API_KEY";
/// CoinGecko API key.
pub const COIN_GECKO_API_KEY: &str = "COIN_GECKO_API_KEY";
/// CoinGecko tier used for `Tier::Default`.
pub const COIN_GECKO_SUBSCRIPTION: &str = "COIN_GECKO_SUBSCRIPTION";
/// Enables crypto symbol validation.
pub const COIN_GECKO_VALIDATE_SYMBOLS: &str = "COIN_GECKO_VALIDATE_SYMBOLS";
/// Request timeout in seconds.
pub const PRICE_HTTP_TIMEOUT_SECS: &str = "PRICE_HTTP_TIMEOUT_SECS";

/// Settings shared by the factory and the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Level passed to the logger; `RUST_LOG` still overrides it.
    pub log_level: LevelFilter,
    /// Stocks key, `None` when unset.
    pub alpha_vantage_api_key: Option<String>,
    /// Crypto key, `None` when unset.
    pub coin_gecko_api_key: Option<String>,
    /// Crypto tier used when the caller asks for `Tier::Default`.
    /// Kept as text so a bad value fails as `UnknownTier` at build time.
    pub coin_gecko_subscription: String,
    /// Fetch and enforce the supported crypto symbol list.
    pub validate_crypto_symbols: bool,
    /// Per-request timeout.
    pub http_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            alpha_vantage_api_key: None,
            coin_gecko_api_key: None,
            coin_gecko_subscription: Tier::Free.to_string(),
            validate_crypto_symbols: false,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let log_level = match get(LOG_LEVEL) {
            Some(level) => level
                .parse::<LevelFilter>()
                .map_err(|_| PriceError::Config(format!("{LOG_LEVEL}={level} is not a log level")))?,
            None => defaults.log_level,
        };

        let validate_crypto_symbols = match get(COIN_GECKO_VALIDATE_SYMBOLS) {
            Some(flag) => parse_flag(COIN_GECKO_VALIDATE_SYMBOLS, &flag)?,
            None => defaults.validate_crypto_symbols,
        };

        let http_timeout = match get(PRICE_HTTP_TIMEOUT_SECS) {
            Some(secs) => secs
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    PriceError::Config(format!(
                        "{PRICE_HTTP_TIMEOUT_SECS}={secs} is not a positive number of seconds"
                    ))
                })?,
            None => defaults.http_timeout,
        };

        let settings = Self {
            log_level,
            alpha_vantage_api_key: get(ALPHA_VANTAGE_API_KEY),
            coin_gecko_api_key: get(COIN_GECKO_API_KEY),
            coin_gecko_subscription: get(COIN_GECKO_SUBSCRIPTION)
                .unwrap_or(defaults.coin_gecko_subscription),
            validate_crypto_symbols,
            http_timeout,
        };
        Ok(settings)
    }

    /// Logs a warning for every provider key that is missing.
    pub fn warn_missing_keys(&self) {
        if self.alpha_vantage_api_key.is_none() {
            warn!("{ALPHA_VANTAGE_API_KEY} is not set; stock requests will be unauthenticated");
        }
        if self.coin_gecko_api_key.is_none() {
            warn!("{COIN_GECKO_API_KEY} is not set; crypto requests will be unauthenticated");
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PriceError::Config(format!("{name}={value} is not a boolean"))),
    }
}
