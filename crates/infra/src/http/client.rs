use std::time::Duration;

use async_trait::async_trait;
use relay_core::{HttpTransport, OutboundRequest, TransportResponse};
use relay_domain::constants::DEFAULT_TIMEOUT_MS;
use relay_domain::{RelayError, TransportError};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use tracing::debug;

use crate::errors::{InfraError, IntoTransportError};

/// Longest slice of an error body kept in a status error message.
const MAX_ERROR_BODY_CHARS: usize = 256;

/// HTTP transport backed by reqwest.
///
/// Sends each request exactly once; the per-request timeout comes from the
/// gateway.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, RelayError> {
        Self::builder().build()
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let timeout = request.timeout;
        let method = Method::from_bytes(request.method.as_str().as_bytes()).map_err(|_| {
            TransportError::Other(format!("invalid HTTP method: {}", request.method))
        })?;

        let mut builder = self.client.request(method.clone(), &request.url).timeout(timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let built = builder.build().map_err(|err| err.into_transport(timeout))?;
        let url = built.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let response = self.client.execute(built).await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            err.into_transport(timeout)
        })?;

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        let body = response.bytes().await.map_err(|err| err.into_transport(timeout))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: status_message(status, &body),
            });
        }

        Ok(TransportResponse { status: status.as_u16(), body: body.to_vec() })
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        text.chars().take(MAX_ERROR_BODY_CHARS).collect()
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Client-wide upper bound; each request also carries its own timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, RelayError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            RelayError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}
