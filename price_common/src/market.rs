//! Markets and subscription tiers a client can be built for.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Supported markets.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Market {
    /// Equities via Alpha Vantage.
    Stocks,
    /// Cryptocurrencies via CoinGecko.
    Crypto,
}

/// Provider subscription tiers.
///
/// `Default` defers to the configured tier for the market.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Tier {
    Default,
    Free,
    Premium,
}
