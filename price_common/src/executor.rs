//! Request dispatch shared by the stocks and crypto clients.
//!
//! A [`RequestExecutor`] owns an immutable [`ClientConfig`] (base URL, default
//! headers, default query parameters) and a [`Transport`]. Every call merges its
//! own headers and parameters over the defaults without touching them.
use std::collections::BTreeMap;

use log::{error, trace};
use url::Url;

use crate::error::PriceError;
use crate::net::HttpMethod;
use crate::result::Result;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// String map used for headers and query parameters.
pub type Params = BTreeMap<String, String>;

/// Base configuration of a provider client. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    default_headers: Params,
    default_params: Params,
}

impl ClientConfig {
    /// Parses `base_url` and starts with empty defaults.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            default_headers: Params::new(),
            default_params: Params::new(),
        })
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Adds a query parameter sent with every request.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_params.insert(name.into(), value.into());
        self
    }

    /// URL endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers sent with every request.
    pub fn default_headers(&self) -> &Params {
        &self.default_headers
    }

    /// Query parameters sent with every request.
    pub fn default_params(&self) -> &Params {
        &self.default_params
    }

    /// Resolves `endpoint` against the base URL.
    ///
    /// Relative endpoints append to the base path, absolute URLs replace it.
    pub fn resolve(&self, endpoint: Option<&str>) -> Result<Url> {
        match endpoint {
            Some(endpoint) => Ok(self.base_url.join(endpoint)?),
            None => Ok(self.base_url.clone()),
        }
    }
}

/// Returns `defaults` overlaid with `overrides`; overriding keys win.
fn merge(defaults: &Params, overrides: Option<&Params>) -> Params {
    let mut merged = defaults.clone();
    if let Some(overrides) = overrides {
        merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Issues requests against one provider.
pub struct RequestExecutor {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl RequestExecutor {
    /// Binds a configuration to a transport.
    pub fn new(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Base configuration; never changes after construction.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends one request and returns the response if its status is 2xx.
    ///
    /// Fails with `InvalidMethod` before touching the network when `method` is
    /// not GET or POST, and with `UpstreamHttp` on a non-success status.
    pub fn execute(
        &self,
        method: HttpMethod,
        endpoint: Option<&str>,
        headers: Option<&Params>,
        params: Option<&Params>,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        trace!("execute: enter {method} {}", endpoint.unwrap_or_default());

        if !method.is_supported() {
            error!("execute: {method} is not one of {:?}", HttpMethod::SUPPORTED);
            return Err(PriceError::InvalidMethod(method));
        }

        let mut url = self.config.resolve(endpoint)?;
        let params = merge(&self.config.default_params, params);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        let request = HttpRequest {
            method,
            url,
            headers: merge(&self.config.default_headers, headers),
            body: if method == HttpMethod::Post { body } else { None },
        };

        let response = self.transport.send(&request)?;
        if !response.is_success() {
            error!(
                "execute: provider answered {} {} for {}",
                response.status,
                response.reason,
                request.url.path()
            );
            return Err(PriceError::UpstreamHttp {
                status: response.status,
                reason: response.reason,
            });
        }

        trace!("execute: exit {} {}", response.status, request.url.path());
        Ok(response)
    }

    /// `GET endpoint` with extra query parameters.
    pub fn get(&self, endpoint: &str, params: Option<&Params>) -> Result<HttpResponse> {
        self.execute(HttpMethod::Get, Some(endpoint), None, params, None)
    }
}
