//! Conversion of provider price fields into `f64`.
use log::error;
use serde_json::Value;

use crate::error::PriceError;
use crate::result::Result;

/// Reason attached to `MalformedResponse` when a price cannot be used.
pub const NON_NUMERIC_PRICE: &str = "non-numeric price";

/// Parses a response body, treating invalid JSON as a malformed response.
pub fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| {
        error!("parse_body: response is not valid JSON: {e}");
        PriceError::malformed("invalid JSON")
    })
}

/// Accepts a JSON number or a string holding one.
///
/// The result is finite and non-negative; anything else is malformed.
pub fn coerce_price(value: &Value) -> Result<f64> {
    let price = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match price {
        Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(PriceError::malformed(NON_NUMERIC_PRICE)),
    }
}
