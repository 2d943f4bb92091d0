//! `Result` alias used throughout the price clients.
use crate::error::PriceError;

/// `Result` whose error defaults to `PriceError`, so signatures read `Result<T>`.
pub type Result<T, E = PriceError> = std::result::Result<T, E>;
