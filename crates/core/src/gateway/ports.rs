//! Port interfaces for the HTTP transport
//!
//! The gateway hands a fully prepared request to the transport and gets the
//! raw response back. Implementations live in `relay-infra`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use relay_domain::{HttpMethod, TransportError};
use serde_json::Value;

/// Request as it leaves the interceptor stage.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    /// Base URL already prepended
    pub url: String,
    /// Header names are stored lowercase
    pub headers: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl OutboundRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }
}

/// Successful (2xx) transport response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Trait for executing prepared requests over the network
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute the request once.
    ///
    /// Non-2xx statuses, timeouts and network failures are reported as
    /// [`TransportError`].
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}
