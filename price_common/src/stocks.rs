//! Equity prices from the Alpha Vantage daily time series.
//!
//! The provider answers with
//! `{"Time Series (Daily)": {"YYYY-MM-DD": {"4. close": "<number>", ...}, ...}}`;
//! the latest date's close is the price.
use log::{debug, error, warn};
use serde_json::Value;

use crate::error::PriceError;
use crate::executor::{ClientConfig, Params, RequestExecutor};
use crate::net::{
    ALPHA_VANTAGE_API_KEY_PARAM, ALPHA_VANTAGE_API_URL, ALPHA_VANTAGE_QUERY_ENDPOINT, CLOSE_KEY,
    TIME_SERIES_DAILY, TIME_SERIES_DAILY_KEY,
};
use crate::price::{coerce_price, parse_body};
use crate::result::Result;
use crate::symbol::Symbol;
use crate::transport::Transport;

/// Keys Alpha Vantage uses instead of data when it refuses a request.
const PROVIDER_NOTICE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Client for the stocks market.
pub struct StocksClient {
    executor: RequestExecutor,
}

impl StocksClient {
    /// Builds the Alpha Vantage configuration.
    ///
    /// Without a key the `apikey` parameter is left out entirely.
    pub fn config(api_key: Option<&str>) -> Result<ClientConfig> {
        let config = ClientConfig::new(ALPHA_VANTAGE_API_URL)?;
        Ok(match api_key {
            Some(key) => config.with_param(ALPHA_VANTAGE_API_KEY_PARAM, key),
            None => config,
        })
    }

    /// Binds a configuration to a transport.
    pub fn new(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            executor: RequestExecutor::new(config, transport),
        }
    }

    /// Underlying request executor.
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Latest daily close for `symbol`. One request per call.
    pub fn get_price(&self, symbol: &Symbol) -> Result<f64> {
        let params = Params::from([
            (String::from("function"), String::from(TIME_SERIES_DAILY)),
            (String::from("symbol"), symbol.to_string()),
        ]);

        let response = self
            .executor
            .get(ALPHA_VANTAGE_QUERY_ENDPOINT, Some(&params))?;
        let price = extract_daily_close(&response.body)?;

        debug!("stocks: {symbol} closed at {price}");
        Ok(price)
    }
}

/// Pulls the close of the most recent date out of a daily time series body.
pub fn extract_daily_close(body: &str) -> Result<f64> {
    let json: Value = parse_body(body)?;
    let Some(root) = json.as_object() else {
        error!("extract_daily_close: expected a JSON object, got {json}");
        return Err(PriceError::malformed("expected JSON object"));
    };

    let Some(series) = root.get(TIME_SERIES_DAILY_KEY) else {
        for key in PROVIDER_NOTICE_KEYS {
            if let Some(notice) = root.get(key) {
                warn!("Alpha Vantage {key}: {notice}");
            }
        }
        error!(
            "extract_daily_close: '{TIME_SERIES_DAILY_KEY}' not in response keys {:?}",
            root.keys().collect::<Vec<_>>()
        );
        return Err(PriceError::malformed("missing time series key"));
    };

    let Some(series) = series.as_object() else {
        return Err(PriceError::malformed("missing time series key"));
    };

    // ISO dates sort lexicographically in calendar order.
    let Some((date, record)) = series.iter().max_by(|a, b| a.0.cmp(b.0)) else {
        return Err(PriceError::malformed("empty time series"));
    };

    let Some(close) = record.get(CLOSE_KEY) else {
        error!("extract_daily_close: '{CLOSE_KEY}' missing from {date} record {record}");
        return Err(PriceError::malformed("missing close key"));
    };

    debug!("extract_daily_close: using {date}");
    coerce_price(close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;

    fn reason(result: Result<f64>) -> String {
        match result {
            Err(PriceError::MalformedResponse { reason }) => reason,
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn single_day_close_is_parsed_as_float() {
        let body = r#"{"Time Series (Daily)": {"2024-01-01": {"4. close": "150.25"}}}"#;
        assert_eq!(extract_daily_close(body).unwrap(), 150.25);
    }

    #[test]
    fn latest_date_wins_regardless_of_key_order() {
        let newest_last = r#"{"Time Series (Daily)": {
            "2024-01-01": {"4. close": "100.00"},
            "2024-01-02": {"4. close": "101.50"}}}"#;
        let newest_first = r#"{"Time Series (Daily)": {
            "2024-01-02": {"4. close": "101.50"},
            "2024-01-01": {"4. close": "100.00"}}}"#;

        assert_eq!(extract_daily_close(newest_last).unwrap(), 101.5);
        assert_eq!(extract_daily_close(newest_first).unwrap(), 101.5);
    }

    #[test]
    fn missing_series_key_is_malformed() {
        let body = r#"{"Error Message": "Invalid API call."}"#;
        assert_eq!(reason(extract_daily_close(body)), "missing time series key");
    }

    #[test]
    fn missing_close_key_is_malformed() {
        let body = r#"{"Time Series (Daily)": {"2024-01-01": {"1. open": "150.00"}}}"#;
        assert_eq!(reason(extract_daily_close(body)), "missing close key");
    }

    #[test]
    fn non_numeric_close_is_malformed() {
        let body = r#"{"Time Series (Daily)": {"2024-01-01": {"4. close": "n/a"}}}"#;
        assert_eq!(reason(extract_daily_close(body)), "non-numeric price");
    }

    #[test]
    fn empty_series_and_non_object_bodies_are_malformed() {
        assert_eq!(
            reason(extract_daily_close(r#"{"Time Series (Daily)": {}}"#)),
            "empty time series"
        );
        assert_eq!(reason(extract_daily_close("[1, 2]")), "expected JSON object");
        assert_eq!(reason(extract_daily_close("not json")), "invalid JSON");
    }

    #[test]
    fn get_price_queries_daily_series_with_api_key() {
        let transport = FakeTransport::replying(&[
            r#"{"Time Series (Daily)": {"2024-03-08": {"4. close": "170.73"}}}"#,
        ]);
        let client = StocksClient::new(
            StocksClient::config(Some("secret")).unwrap(),
            Box::new(transport.clone()),
        );

        let price = client.get_price(&Symbol::new("IBM").unwrap()).unwrap();
        assert_eq!(price, 170.73);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url.path(), "/query");
        let query: Params = sent[0].url.query_pairs().into_owned().collect();
        assert_eq!(query.get("function").map(String::as_str), Some("TIME_SERIES_DAILY"));
        assert_eq!(query.get("symbol").map(String::as_str), Some("ibm"));
        assert_eq!(query.get("apikey").map(String::as_str), Some("secret"));
    }

    #[test]
    fn missing_api_key_omits_the_parameter() {
        let config = StocksClient::config(None).unwrap();
        assert!(config.default_params().is_empty());
    }
}
