use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::ServiceConfig;
use crate::error::{BridgeError, Result};
use crate::request::ApiRequest;

/// What the wire gave back: status plus the unparsed body. Interpretation
/// belongs to the assessor and the result-extraction step, not the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a built request and returns whatever response arrives, regardless of
/// status. Only connectivity-level failures surface as errors.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse>;
}

#[derive(Clone)]
pub struct HttpTransport {
    config: ServiceConfig,
    http: Client,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|e| {
                BridgeError::Validation(format!("invalid SEARCHBRIDGE_API_KEY: {e}"))
            })?;
            headers.insert("api-key", value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}/{}", self.config.base_url, request.path())
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let mut builder = self
            .http
            .request(request.method().clone(), self.url_for(request));
        if !request.params().is_empty() {
            builder = builder.query(request.params());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            status,
            "search service responded"
        );
        Ok(RawResponse { status, body })
    }
}
