//! Error types shared by the price clients and the command-line front end.
//!
//! The `PriceError` enum keeps every failure path distinguishable by variant:
//! request-level mistakes, upstream HTTP failures, response-shape violations,
//! invalid selections and configuration problems.
use std::collections::BTreeSet;

use thiserror::Error;

use crate::net::HttpMethod;

/// Unified error type for the price lookup workspace.
#[derive(Error, Debug)]
pub enum PriceError {
    /// The HTTP verb is outside the allow-list of the request executor.
    #[error("Invalid HTTP method: {0} (supported: GET, POST)")]
    InvalidMethod(HttpMethod),

    /// The provider answered with a non-success status code.
    #[error("Upstream HTTP error: {status} {reason}")]
    UpstreamHttp {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status, if known.
        reason: String,
    },

    /// The provider answered 2xx but the JSON body does not have the expected shape.
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// Short description of the violated expectation.
        reason: String,
    },

    /// The market name is not one of the supported markets.
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    /// The subscription tier is not recognised for the selected market.
    #[error("Unknown subscription tier: {0}")]
    UnknownTier(String),

    /// One or more requested crypto symbols are not supported by the provider.
    #[error("Unsupported symbols {requested:?}; the provider supports {} symbols", supported.len())]
    UnsupportedSymbols {
        /// Symbols that were requested.
        requested: BTreeSet<String>,
        /// Symbols the provider reported as supported.
        supported: BTreeSet<String>,
    },

    /// A symbol was empty or contained no usable characters.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// An environment setting could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network-level failure (connection, timeout, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Base URL or endpoint could not be parsed or joined.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl PriceError {
    /// Shorthand for a `MalformedResponse` with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        PriceError::MalformedResponse {
            reason: reason.into(),
        }
    }
}
