//! Blocking HTTP transport used by the request executor.
//!
//! The [`Transport`] trait is the seam between request building and the wire:
//! production code uses [`ReqwestTransport`], tests plug in a recording fake.
use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;
use url::Url;

use crate::net::{HttpMethod, USER_AGENT};
use crate::result::Result;

/// Fully resolved request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Verb, already checked against the allow-list.
    pub method: HttpMethod,
    /// Target URL with query parameters applied.
    pub url: Url,
    /// Merged request headers.
    pub headers: BTreeMap<String, String>,
    /// Optional request body (POST only).
    pub body: Option<String>,
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase.
    pub reason: String,
    /// Body as text.
    pub body: String,
}

impl HttpResponse {
    /// Builds a `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: String::from("OK"),
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends a request and returns the raw response, whatever its status.
pub trait Transport {
    /// Performs the request. Network failures are errors, HTTP statuses are not.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            HttpMethod::Post => self.client.post(request.url.clone()),
            _ => self.client.get(request.url.clone()),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text()?;
        debug!("{} {} -> {}", request.method, request.url.path(), status);

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_the_2xx_range() {
        let mut response = HttpResponse::ok("{}");
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 429;
        assert!(!response.is_success());
    }
}
