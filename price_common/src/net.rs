//! Provider endpoints, header names and HTTP verbs used by the price clients.

use strum_macros::{Display, EnumString};

/// Base URL of the Alpha Vantage REST API.
pub const ALPHA_VANTAGE_API_URL: &str = "https://www.alphavantage.co/";
/// Query parameter carrying the Alpha Vantage API key.
pub const ALPHA_VANTAGE_API_KEY_PARAM: &str = "apikey";
/// Alpha Vantage query endpoint, relative to the base URL.
pub const ALPHA_VANTAGE_QUERY_ENDPOINT: &str = "query";
/// `function` value for the daily time series.
pub const TIME_SERIES_DAILY: &str = "TIME_SERIES_DAILY";
/// Top-level key of the daily time series container.
pub const TIME_SERIES_DAILY_KEY: &str = "Time Series (Daily)";
/// Close price key inside a daily record.
pub const CLOSE_KEY: &str = "4. close";

/// CoinGecko base URL for the free (demo) plan.
pub const COIN_GECKO_DEMO_API_URL: &str = "https://api.coingecko.com/api/v3/";
/// CoinGecko API key header for the free (demo) plan.
pub const COIN_GECKO_DEMO_API_KEY_HEADER: &str = "x-cg-demo-api-key";
/// CoinGecko base URL for the paid (pro) plan.
pub const COIN_GECKO_PRO_API_URL: &str = "https://pro-api.coingecko.com/api/v3/";
/// CoinGecko API key header for the paid (pro) plan.
pub const COIN_GECKO_PRO_API_KEY_HEADER: &str = "x-cg-pro-api-key";
/// Spot price endpoint, relative to the base URL.
pub const COIN_GECKO_SIMPLE_PRICE_ENDPOINT: &str = "simple/price";
/// Supported symbol list endpoint, relative to the base URL.
pub const COIN_GECKO_SUPPORTED_ENDPOINT: &str = "simple/supported_vs_currencies";
/// Quote currency for crypto prices.
pub const USD: &str = "usd";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("price_client/", env!("CARGO_PKG_VERSION"));
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP verbs a caller may ask for.
///
/// Only `GET` and `POST` are dispatched; see [`HttpMethod::SUPPORTED`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Verbs the request executor will dispatch.
    pub const SUPPORTED: [HttpMethod; 2] = [HttpMethod::Get, HttpMethod::Post];

    /// Returns `true` if the verb is in the allow-list.
    pub fn is_supported(self) -> bool {
        Self::SUPPORTED.contains(&self)
    }
}
