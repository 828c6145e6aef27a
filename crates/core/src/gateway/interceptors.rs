//! Request and response interceptors

use std::sync::Arc;

use relay_domain::constants::TOKEN_HEADER;
use relay_domain::ResponseEnvelope;
use serde::de::DeserializeOwned;

use super::errors::GatewayError;
use super::ports::{OutboundRequest, TransportResponse};
use crate::session::TokenSource;

/// Hook run on every request before it reaches the transport.
///
/// An error aborts the call; no network request is issued.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: &mut OutboundRequest) -> Result<(), GatewayError>;
}

/// Attaches the session token as the `xtoken` header.
///
/// The token is read on every call, so a login or logout between two calls
/// is always observed.
pub struct TokenHeaderInterceptor {
    source: Arc<dyn TokenSource>,
}

impl TokenHeaderInterceptor {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self { source }
    }
}

impl RequestInterceptor for TokenHeaderInterceptor {
    fn intercept(&self, request: &mut OutboundRequest) -> Result<(), GatewayError> {
        let Some(token) = self.source.token().filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        if !is_valid_header_value(&token) {
            return Err(GatewayError::PreSend(format!(
                "session token is not a valid `{TOKEN_HEADER}` header value"
            )));
        }

        request.insert_header(TOKEN_HEADER, token);
        Ok(())
    }
}

/// Visible ASCII, spaces and tabs; everything else would corrupt the
/// header block.
fn is_valid_header_value(value: &str) -> bool {
    value.bytes().all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
}

/// Unwrap a `{code, message, data}` response body.
///
/// Only an integer `code` of 200 is success, yielding `data` (deserialized
/// as `T`, `null` when absent). Every other body, including one that is not
/// JSON or has no usable `code`, becomes [`GatewayError::Application`]
/// carrying the envelope `message` or `"Error"`.
///
/// # Errors
/// [`GatewayError::Application`] for anything but a success envelope,
/// [`GatewayError::InvalidEnvelope`] when `data` does not fit `T`.
pub fn unwrap_envelope<T: DeserializeOwned>(response: &TransportResponse) -> Result<T, GatewayError> {
    let envelope = ResponseEnvelope::from_slice(&response.body);

    if !envelope.is_success() {
        return Err(GatewayError::Application {
            code: envelope.code,
            message: envelope.failure_message().to_string(),
        });
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| GatewayError::InvalidEnvelope(format!("Unexpected payload shape: {e}")))
}
