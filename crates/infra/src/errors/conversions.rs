//! Conversions from external infrastructure errors into domain errors.

use std::time::Duration;

use relay_domain::{RelayError, TransportError};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RelayError);

impl From<InfraError> for RelayError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RelayError> for InfraError {
    fn from(value: RelayError) -> Self {
        InfraError(value)
    }
}

/// Classify a failed HTTP exchange for the gateway.
///
/// `timeout` is the limit the request ran with, reported back on timeouts.
pub(crate) trait IntoTransportError {
    fn into_transport(self, timeout: Duration) -> TransportError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

impl IntoTransportError for HttpError {
    fn into_transport(self, timeout: Duration) -> TransportError {
        if self.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TransportError::Connect(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return TransportError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        TransportError::Other(self.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RelayError (client construction) */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(RelayError::Config(format!("failed to build HTTP client: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_maps_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error =
            client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        match error.into_transport(Duration::from_secs(5)) {
            TransportError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_response_maps_to_timeout_with_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let limit = Duration::from_millis(50);
        let client = Client::builder().no_proxy().timeout(limit).build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap_err();

        assert_eq!(error.into_transport(limit), TransportError::Timeout { timeout_ms: 50 });
    }

    #[tokio::test]
    async fn refused_connection_maps_to_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        match error.into_transport(Duration::from_secs(5)) {
            TransportError::Connect(msg) => assert!(msg.contains("connection")),
            other => panic!("expected connect error, got {:?}", other),
        }
    }
}
