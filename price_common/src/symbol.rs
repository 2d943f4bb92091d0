//! Ticker and coin symbols as typed in by the user.
//!
//! Symbols are trimmed and lowercased on construction, so every provider call
//! and every set comparison sees the same spelling.
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PriceError;
use crate::result::Result;

/// Non-empty, lowercase symbol such as `ibm` or `btc`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Trims and lowercases `raw`; blank or spaced input is rejected.
    pub fn new(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(PriceError::InvalidSymbol(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Splits input on commas and whitespace, keeping first occurrences only.
    ///
    /// `"BTC, eth btc"` yields `[btc, eth]`. Input without any symbol is an error.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>> {
        let mut seen = BTreeSet::new();
        let mut symbols = Vec::new();

        for part in raw.split(|c: char| c == ',' || c.is_whitespace()) {
            if part.is_empty() {
                continue;
            }
            let symbol = Self::new(part)?;
            if seen.insert(symbol.clone()) {
                symbols.push(symbol);
            }
        }

        if symbols.is_empty() {
            return Err(PriceError::InvalidSymbol(raw.to_string()));
        }
        Ok(symbols)
    }

    /// Normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_trimmed_and_lowercased() {
        assert_eq!(Symbol::new("  AAPL ").unwrap().as_str(), "aapl");
        assert_eq!("Eth".parse::<Symbol>().unwrap().to_string(), "eth");
    }

    #[test]
    fn blank_or_spaced_symbols_are_rejected() {
        assert!(matches!(Symbol::new("   "), Err(PriceError::InvalidSymbol(_))));
        assert!(matches!(Symbol::new("br k"), Err(PriceError::InvalidSymbol(_))));
    }

    #[test]
    fn list_splits_on_commas_and_whitespace_and_drops_duplicates() {
        let symbols = Symbol::parse_list("BTC, eth\nbtc ,,ltc").unwrap();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, ["btc", "eth", "ltc"]);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(Symbol::parse_list(" , "), Err(PriceError::InvalidSymbol(_))));
    }
}
