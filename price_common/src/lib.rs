//!
//! Price lookup clients for equities (Alpha Vantage) and crypto (CoinGecko).
//!
//! This crate aggregates:
//! - `error` — unified error type `PriceError`.
//! - `result` — handy `Result<T, PriceError>` alias.
//! - `net` — provider endpoints, header names and HTTP verbs.
//! - `transport` — blocking HTTP transport seam.
//! - `executor` — request dispatch with default headers and parameters.
//! - `stocks` / `crypto` — provider clients and response extractors.
//! - `client` — market-agnostic client and its factory.
//! - `market`, `symbol`, `price`, `settings` — shared helpers.
#![warn(missing_docs)]
pub mod client;
pub mod crypto;
pub mod error;
pub mod executor;
pub mod market;
pub mod net;
pub mod price;
pub mod result;
pub mod settings;
pub mod stocks;
pub mod symbol;
pub mod transport;

pub use client::{Client, ClientFactory};
pub use error::PriceError;
pub use market::{Market, Tier};
pub use result::Result;
pub use settings::Settings;
pub use symbol::Symbol;
