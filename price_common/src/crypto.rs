//! Spot prices from the CoinGecko `simple/price` endpoint.
//!
//! Responses look like `{"btc": {"usd": 65000.1}, "eth": {"usd": 3400.5}}`.
//! Optionally the client checks requested symbols against the provider's
//! supported list, fetched once when the client is built.
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::error::PriceError;
use crate::executor::{ClientConfig, Params, RequestExecutor};
use crate::market::Tier;
use crate::net::{
    COIN_GECKO_DEMO_API_KEY_HEADER, COIN_GECKO_DEMO_API_URL, COIN_GECKO_PRO_API_KEY_HEADER,
    COIN_GECKO_PRO_API_URL, COIN_GECKO_SIMPLE_PRICE_ENDPOINT, COIN_GECKO_SUPPORTED_ENDPOINT, USD,
};
use crate::price::{coerce_price, parse_body};
use crate::result::Result;
use crate::symbol::Symbol;
use crate::transport::Transport;

/// Base URL and key header of one CoinGecko plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoPlan {
    /// Versioned API root, with trailing slash.
    pub base_url: &'static str,
    /// Header carrying the API key.
    pub api_key_header: &'static str,
}

impl CryptoPlan {
    /// Free plan.
    pub const DEMO: CryptoPlan = CryptoPlan {
        base_url: COIN_GECKO_DEMO_API_URL,
        api_key_header: COIN_GECKO_DEMO_API_KEY_HEADER,
    };

    /// Paid plan.
    pub const PRO: CryptoPlan = CryptoPlan {
        base_url: COIN_GECKO_PRO_API_URL,
        api_key_header: COIN_GECKO_PRO_API_KEY_HEADER,
    };

    /// Plan for a concrete tier. `Tier::Default` must be resolved by the caller.
    pub fn for_tier(tier: Tier) -> Result<Self> {
        match tier {
            Tier::Free => Ok(Self::DEMO),
            Tier::Premium => Ok(Self::PRO),
            Tier::Default => Err(PriceError::UnknownTier(tier.to_string())),
        }
    }
}

/// Construction-time settings of a [`CryptoClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoConfig {
    /// Plan selected by the tier.
    pub plan: CryptoPlan,
    /// Sent in the plan's key header when present.
    pub api_key: Option<String>,
    /// Quote currency, lowercase.
    pub currency: String,
    /// Check symbols against the provider's supported list before pricing.
    pub validate_symbols: bool,
}

impl CryptoConfig {
    /// USD prices, validation off.
    pub fn new(plan: CryptoPlan, api_key: Option<String>) -> Self {
        Self {
            plan,
            api_key,
            currency: String::from(USD),
            validate_symbols: false,
        }
    }

    /// Turns supported-symbol validation on or off.
    pub fn with_validation(mut self, validate_symbols: bool) -> Self {
        self.validate_symbols = validate_symbols;
        self
    }

    /// Request defaults for the plan; the key header is left out without a key.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(self.plan.base_url)?;
        Ok(match &self.api_key {
            Some(key) => config.with_header(self.plan.api_key_header, key.as_str()),
            None => config,
        })
    }
}

/// Client for the crypto market.
pub struct CryptoClient {
    executor: RequestExecutor,
    plan: CryptoPlan,
    currency: String,
    validate_symbols: bool,
    supported: BTreeSet<String>,
}

impl CryptoClient {
    /// Builds the client, fetching the supported symbol list when validation is on.
    pub fn new(config: CryptoConfig, transport: Box<dyn Transport>) -> Result<Self> {
        let executor = RequestExecutor::new(config.client_config()?, transport);

        let supported = if config.validate_symbols {
            fetch_supported_symbols(&executor)?
        } else {
            debug!("crypto: symbol validation disabled, skipping supported list");
            BTreeSet::new()
        };

        Ok(Self {
            executor,
            plan: config.plan,
            currency: config.currency.to_lowercase(),
            validate_symbols: config.validate_symbols,
            supported,
        })
    }

    /// Underlying request executor.
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Plan the client talks to.
    pub fn plan(&self) -> CryptoPlan {
        self.plan
    }

    /// Quote currency, lowercase.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Whether requested symbols are checked against the supported list.
    pub fn validation_enabled(&self) -> bool {
        self.validate_symbols
    }

    /// Cached supported symbols; empty when validation is disabled.
    pub fn list_supported_symbols(&self) -> &BTreeSet<String> {
        &self.supported
    }

    /// `true` if every requested symbol is supported, or validation is off.
    pub fn validate_symbols(&self, requested: &[Symbol]) -> bool {
        if !self.validate_symbols {
            return true;
        }
        requested
            .iter()
            .all(|symbol| self.supported.contains(symbol.as_str()))
    }

    /// Spot prices for `symbols` in the client's quote currency. One request.
    pub fn get_prices(&self, symbols: &[Symbol]) -> Result<BTreeMap<String, f64>> {
        if !self.validate_symbols(symbols) {
            let requested: BTreeSet<String> = symbols.iter().map(Symbol::to_string).collect();
            error!(
                "get_prices: {:?} not in the {} supported symbols",
                requested.difference(&self.supported).collect::<Vec<_>>(),
                self.supported.len()
            );
            return Err(PriceError::UnsupportedSymbols {
                requested,
                supported: self.supported.clone(),
            });
        }

        let csv = symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let params = Params::from([
            (String::from("vs_currencies"), self.currency.clone()),
            (String::from("symbols"), csv),
        ]);

        let response = self
            .executor
            .get(COIN_GECKO_SIMPLE_PRICE_ENDPOINT, Some(&params))?;
        let prices = extract_prices(symbols, &response.body, &self.currency)?;

        debug!("crypto: {prices:?}");
        Ok(prices)
    }
}

fn fetch_supported_symbols(executor: &RequestExecutor) -> Result<BTreeSet<String>> {
    let response = executor.get(COIN_GECKO_SUPPORTED_ENDPOINT, None)?;
    let json = parse_body(&response.body)?;

    let Some(items) = json.as_array() else {
        error!("fetch_supported_symbols: expected an array, got {json}");
        return Err(PriceError::malformed("expected array of strings"));
    };

    let mut supported = BTreeSet::new();
    for item in items {
        let Some(symbol) = item.as_str() else {
            error!("fetch_supported_symbols: non-string entry {item}");
            return Err(PriceError::malformed("expected array of strings"));
        };
        supported.insert(symbol.to_lowercase());
    }

    if supported.is_empty() {
        warn!("fetch_supported_symbols: provider reported no supported symbols");
    }
    info!("Loaded {} supported crypto symbols", supported.len());
    Ok(supported)
}

/// Reads the `currency` price of every requested symbol out of a `simple/price` body.
///
/// The map holds exactly the requested symbols; any missing one is an error.
pub fn extract_prices(
    symbols: &[Symbol],
    body: &str,
    currency: &str,
) -> Result<BTreeMap<String, f64>> {
    let json: Value = parse_body(body)?;
    let Some(root) = json.as_object() else {
        error!("extract_prices: expected a JSON object, got {json}");
        return Err(PriceError::malformed("expected JSON object"));
    };

    let mut prices = BTreeMap::new();
    for symbol in symbols {
        let Some(info) = root.get(symbol.as_str()) else {
            error!(
                "extract_prices: '{symbol}' not in response keys {:?}",
                root.keys().collect::<Vec<_>>()
            );
            return Err(PriceError::malformed("symbol missing from response"));
        };

        let Some(value) = info.get(currency) else {
            error!("extract_prices: '{currency}' missing for '{symbol}': {info}");
            return Err(PriceError::malformed("currency key missing"));
        };

        prices.insert(symbol.to_string(), coerce_price(value)?);
    }

    Ok(prices)
}
