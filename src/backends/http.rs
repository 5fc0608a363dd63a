//! reqwest-backed HTTP transport.
//!
//! # Requirements
//!
//! - The `reqwest-transport` feature (on by default)
//! - Network access to the configured base URL
//!
//! Timeouts come from [`ClientConfig::timeout`] and surface as
//! [`ClientError::Transport`] with `timed_out` set; they are never
//! reported as API errors.

use crate::core::{
    ClientConfig, ClientError, HttpMethod, HttpRequest, HttpResponse, ResponseHeaders, Transport,
};

use async_trait::async_trait;
use reqwest::Method;

/// HTTP transport using a shared `reqwest::Client`.
///
/// # Example
///
/// ```rust,ignore
/// use shieldcortex::backends::ReqwestTransport;
/// use shieldcortex::ClientConfig;
///
/// let config = ClientConfig::new("your-api-key");
/// let transport = ReqwestTransport::new(&config)?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport honoring the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::transport(err.to_string(), err.is_timeout())
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let mut headers = ResponseHeaders::new();
        for (name, value) in response.headers() {
            match value.to_str() {
                Ok(value) => headers.insert(name.as_str(), value),
                Err(_) => tracing::debug!(header = %name, "skipping non-UTF-8 response header"),
            }
        }

        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
