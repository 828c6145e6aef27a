//! Gateway error types
//!
//! Classifies every way a call through the gateway can fail.

use relay_domain::constants::AUTH_FAILURE_CODE;
use relay_domain::{RelayError, TransportError};
use thiserror::Error;

/// Categories of gateway failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCategory {
    /// Request could not be built; nothing was sent
    PreSend,
    /// Network failure, timeout or non-2xx HTTP status
    Transport,
    /// Envelope code other than 200 (or an unreadable envelope)
    Application,
    /// Envelope code 401
    Authentication,
}

/// Gateway operation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Request rejected before send: {0}")]
    PreSend(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Displays as the envelope message alone. `code` is `None` when the
    /// body had no integer code.
    #[error("{message}")]
    Application { code: Option<i64>, message: String },

    #[error("Malformed response envelope: {0}")]
    InvalidEnvelope(String),
}

impl GatewayError {
    pub fn category(&self) -> GatewayErrorCategory {
        match self {
            Self::PreSend(_) => GatewayErrorCategory::PreSend,
            Self::Transport(_) => GatewayErrorCategory::Transport,
            Self::Application { code: Some(AUTH_FAILURE_CODE), .. } => {
                GatewayErrorCategory::Authentication
            }
            Self::Application { .. } | Self::InvalidEnvelope(_) => {
                GatewayErrorCategory::Application
            }
        }
    }

    /// True when the backend answered with envelope code 401.
    ///
    /// Callers decide what to do (e.g. clear the session and redirect to
    /// login); the gateway only classifies.
    pub fn is_auth_failure(&self) -> bool {
        self.category() == GatewayErrorCategory::Authentication
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Timeout { .. }))
    }

    /// Envelope code of an application failure.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Application { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<RelayError> for GatewayError {
    fn from(err: RelayError) -> Self {
        Self::PreSend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(GatewayError::PreSend("bad".into()).category(), GatewayErrorCategory::PreSend);
        assert_eq!(
            GatewayError::Transport(TransportError::Connect("refused".into())).category(),
            GatewayErrorCategory::Transport
        );
        assert_eq!(
            GatewayError::Application { code: Some(500), message: "boom".into() }.category(),
            GatewayErrorCategory::Application
        );
        assert_eq!(
            GatewayError::Application { code: Some(401), message: "expired".into() }.category(),
            GatewayErrorCategory::Authentication
        );
        assert_eq!(
            GatewayError::InvalidEnvelope("not json".into()).category(),
            GatewayErrorCategory::Application
        );
    }

    #[test]
    fn test_auth_failure_flag_only_for_401() {
        assert!(GatewayError::Application { code: Some(401), message: "x".into() }.is_auth_failure());
        assert!(!GatewayError::Application { code: Some(403), message: "x".into() }.is_auth_failure());
        assert!(!GatewayError::Transport(TransportError::Status {
            status: 401,
            message: "Unauthorized".into()
        })
        .is_auth_failure());
    }

    #[test]
    fn test_application_error_displays_message_only() {
        let err = GatewayError::Application { code: Some(500), message: "Error".into() };
        assert_eq!(err.to_string(), "Error");
        assert_eq!(err.code(), Some(500));
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err = GatewayError::from(TransportError::Timeout { timeout_ms: 5000 });
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "request timed out after 5000ms");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_relay_error_maps_to_pre_send() {
        let err = GatewayError::from(RelayError::InvalidInput("request path cannot be empty".into()));
        assert_eq!(err.category(), GatewayErrorCategory::PreSend);
    }
}
