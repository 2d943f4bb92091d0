//! End-to-end lookups through the factory with a scripted transport.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use price_common::crypto::extract_prices;
use price_common::net::HttpMethod;
use price_common::stocks::extract_daily_close;
use price_common::transport::{HttpRequest, HttpResponse, Transport};
use price_common::{Client, ClientFactory, Market, PriceError, Result, Settings, Symbol, Tier};

#[derive(Clone, Default)]
struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<HttpResponse>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    fn new(bodies: &[&str]) -> Self {
        let responses: VecDeque<HttpResponse> =
            bodies.iter().map(|body| HttpResponse::ok(*body)).collect();
        Self {
            responses: Rc::new(RefCell::new(responses)),
            requests: Rc::default(),
        }
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        let next = self.responses.borrow_mut().pop_front();
        Ok(next.unwrap_or(HttpResponse {
            status: 503,
            reason: String::from("Service Unavailable"),
            body: String::new(),
        }))
    }
}

const DAILY: &str = r#"{
    "Meta Data": {"2. Symbol": "IBM"},
    "Time Series (Daily)": {
        "2024-03-07": {"1. open": "188.00", "4. close": "188.32"},
        "2024-03-08": {"1. open": "188.32", "4. close": "191.25"},
        "2024-03-06": {"1. open": "187.50", "4. close": "187.80"}
    }
}"#;

const SIMPLE_PRICE: &str = r#"{"btc":{"usd":65000.1},"eth":{"usd":3400.5}}"#;

fn factory(validate: bool) -> ClientFactory {
    ClientFactory::new(Settings {
        alpha_vantage_api_key: Some(String::from("av-key")),
        coin_gecko_api_key: Some(String::from("cg-key")),
        validate_crypto_symbols: validate,
        ..Settings::default()
    })
}

#[test]
fn stock_lookup_matches_direct_extraction() {
    let transport = ScriptedTransport::new(&[DAILY]);
    let client = factory(false)
        .build_with(Market::Stocks, Tier::Premium, Box::new(transport.clone()))
        .unwrap();

    let quotes = client.lookup("IBM").unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].0.as_str(), "ibm");
    assert_eq!(quotes[0].1, extract_daily_close(DAILY).unwrap());
    assert_eq!(quotes[0].1, 191.25);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].url.host_str(), Some("www.alphavantage.co"));
}

#[test]
fn crypto_lookup_matches_direct_extraction() {
    let transport = ScriptedTransport::new(&[SIMPLE_PRICE]);
    let client = factory(false)
        .build_with(Market::Crypto, Tier::Free, Box::new(transport.clone()))
        .unwrap();

    let quotes = client.lookup("btc eth").unwrap();
    let symbols = Symbol::parse_list("btc eth").unwrap();
    let direct = extract_prices(&symbols, SIMPLE_PRICE, "usd").unwrap();
    for (symbol, price) in &quotes {
        assert_eq!(direct.get(symbol.as_str()), Some(price));
    }

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url.host_str(), Some("api.coingecko.com"));
}

#[test]
fn premium_crypto_goes_to_the_pro_host() {
    let transport = ScriptedTransport::new(&[SIMPLE_PRICE]);
    let client = factory(false)
        .build_with(Market::Crypto, Tier::Premium, Box::new(transport.clone()))
        .unwrap();
    client.lookup("btc").unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].url.host_str(), Some("pro-api.coingecko.com"));
    assert_eq!(
        sent[0].headers.get("x-cg-pro-api-key").map(String::as_str),
        Some("cg-key")
    );
    assert!(!sent[0].headers.contains_key("x-cg-demo-api-key"));
}

#[test]
fn validated_crypto_rejects_unknown_symbol_without_pricing_call() {
    let transport = ScriptedTransport::new(&[r#"["btc", "eth"]"#, SIMPLE_PRICE]);
    let client = factory(true)
        .build_with(Market::Crypto, Tier::Free, Box::new(transport.clone()))
        .unwrap();

    assert!(matches!(
        client.lookup("doge"),
        Err(PriceError::UnsupportedSymbols { .. })
    ));
    assert_eq!(transport.sent().len(), 1);

    let quotes = client.lookup("eth").unwrap();
    assert_eq!(quotes[0].1, 3400.5);
    assert_eq!(transport.sent().len(), 2);
}

#[test]
fn unvalidated_unknown_symbol_surfaces_as_malformed_response() {
    let transport = ScriptedTransport::new(&["{}"]);
    let client = factory(false)
        .build_with(Market::Crypto, Tier::Free, Box::new(transport))
        .unwrap();

    assert!(matches!(
        client.lookup("xyz"),
        Err(PriceError::MalformedResponse { reason }) if reason == "symbol missing from response"
    ));
}

#[test]
fn provider_outage_is_an_upstream_error() {
    let transport = ScriptedTransport::new(&[]);
    let client = factory(false)
        .build_with(Market::Stocks, Tier::Default, Box::new(transport.clone()))
        .unwrap();

    assert!(matches!(
        client.lookup("ibm"),
        Err(PriceError::UpstreamHttp { status: 503, .. })
    ));
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn blank_symbol_is_rejected_before_any_request() {
    let transport = ScriptedTransport::new(&[DAILY]);
    let client: Client = factory(false)
        .build_with(Market::Stocks, Tier::Default, Box::new(transport.clone()))
        .unwrap();

    assert!(matches!(client.lookup("   "), Err(PriceError::InvalidSymbol(_))));
    assert!(transport.sent().is_empty());
}
