//! Market-agnostic client and the factory that builds it.
//!
//! [`ClientFactory`] maps a market and subscription tier to a configured
//! [`Client`]. Stocks ignore the tier; crypto picks a CoinGecko plan from it.
use log::{debug, error, info};

use crate::crypto::{CryptoClient, CryptoConfig, CryptoPlan};
use crate::error::PriceError;
use crate::market::{Market, Tier};
use crate::result::Result;
use crate::settings::Settings;
use crate::stocks::StocksClient;
use crate::symbol::Symbol;
use crate::transport::{ReqwestTransport, Transport};

/// A configured client for one market.
pub enum Client {
    Stocks(StocksClient),
    Crypto(CryptoClient),
}

impl Client {
    /// Market the client was built for.
    pub fn market(&self) -> Market {
        match self {
            Client::Stocks(_) => Market::Stocks,
            Client::Crypto(_) => Market::Crypto,
        }
    }

    /// Prices the symbol(s) typed by the user.
    ///
    /// Stocks take the input as one ticker; crypto accepts a comma or
    /// whitespace separated list. Pairs come back in input order.
    pub fn lookup(&self, input: &str) -> Result<Vec<(Symbol, f64)>> {
        match self {
            Client::Stocks(client) => {
                let symbol = Symbol::new(input)?;
                let price = client.get_price(&symbol)?;
                Ok(vec![(symbol, price)])
            }
            Client::Crypto(client) => {
                let symbols = Symbol::parse_list(input)?;
                let prices = client.get_prices(&symbols)?;
                symbols
                    .into_iter()
                    .map(|symbol| match prices.get(symbol.as_str()) {
                        Some(price) => Ok((symbol, *price)),
                        None => Err(PriceError::malformed("symbol missing from response")),
                    })
                    .collect()
            }
        }
    }
}

/// Builds clients from settings read at start-up.
pub struct ClientFactory {
    settings: Settings,
}

impl ClientFactory {
    /// Creates a factory over settings read at start-up.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Settings the factory builds from.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parses market and tier names, then builds.
    pub fn from_names(&self, market: &str, tier: &str) -> Result<Client> {
        let market = market.trim().parse::<Market>().map_err(|_| {
            error!("from_names: unsupported market '{market}'");
            PriceError::UnknownMarket(market.to_string())
        })?;
        let tier = parse_tier(tier)?;
        self.build(market, tier)
    }

    /// Builds a client over the real HTTP transport.
    pub fn build(&self, market: Market, tier: Tier) -> Result<Client> {
        let transport = ReqwestTransport::new(self.settings.http_timeout)?;
        self.build_with(market, tier, Box::new(transport))
    }

    /// Builds a client over the given transport.
    ///
    /// A crypto client with validation enabled fetches the supported list here.
    pub fn build_with(
        &self,
        market: Market,
        tier: Tier,
        transport: Box<dyn Transport>,
    ) -> Result<Client> {
        debug!("build: market={market} tier={tier}");
        let client = match market {
            // Alpha Vantage plans share one endpoint; the tier is not used.
            Market::Stocks => {
                let config = StocksClient::config(self.settings.alpha_vantage_api_key.as_deref())?;
                Client::Stocks(StocksClient::new(config, transport))
            }
            Market::Crypto => {
                let plan = CryptoPlan::for_tier(self.resolve_crypto_tier(tier)?)?;
                let config = CryptoConfig::new(plan, self.settings.coin_gecko_api_key.clone())
                    .with_validation(self.settings.validate_crypto_symbols);
                Client::Crypto(CryptoClient::new(config, transport)?)
            }
        };

        info!("Using {market} client");
        Ok(client)
    }

    /// Replaces `Tier::Default` with the configured crypto subscription.
    fn resolve_crypto_tier(&self, tier: Tier) -> Result<Tier> {
        if tier != Tier::Default {
            return Ok(tier);
        }
        match parse_tier(&self.settings.coin_gecko_subscription)? {
            Tier::Default => Err(PriceError::UnknownTier(
                self.settings.coin_gecko_subscription.clone(),
            )),
            tier => Ok(tier),
        }
    }
}

fn parse_tier(tier: &str) -> Result<Tier> {
    tier.trim().parse::<Tier>().map_err(|_| {
        error!("parse_tier: unsupported subscription '{tier}'");
        PriceError::UnknownTier(tier.to_string())
    })
}
