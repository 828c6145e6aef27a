//! Request gateway service

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use relay_domain::{resolve_url, ApiConfig, RequestDescriptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::errors::GatewayError;
use super::interceptors::{unwrap_envelope, RequestInterceptor, TokenHeaderInterceptor};
use super::ports::{HttpTransport, OutboundRequest, TransportResponse};
use crate::session::TokenSource;

/// Gateway for all outbound API calls
pub struct RequestGateway {
    transport: Arc<dyn HttpTransport>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    base_url: String,
    timeout: Duration,
}

impl RequestGateway {
    /// Create a gateway reading its token from `session`.
    ///
    /// Base URL and timeout are taken from `config` and fixed from here on.
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn HttpTransport>,
        session: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            transport,
            interceptors: vec![Arc::new(TokenHeaderInterceptor::new(session))],
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }

    /// Register an interceptor that runs after the token interceptor.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a request and unwrap the response envelope into `T`.
    ///
    /// # Errors
    /// - [`GatewayError::PreSend`] if the request could not be prepared
    /// - [`GatewayError::Transport`] for network failures, timeouts and
    ///   non-2xx statuses
    /// - [`GatewayError::Application`] / [`GatewayError::InvalidEnvelope`]
    ///   for envelope failures
    #[instrument(skip(self, descriptor), fields(method = %descriptor.method, path = %descriptor.path))]
    pub async fn send<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, GatewayError> {
        let request = self.prepare(descriptor)?;
        let response = self.dispatch(request).await?;

        unwrap_envelope(&response).inspect_err(|err| {
            debug!(error = %err, code = ?err.code(), "backend rejected request");
        })
    }

    /// Send a request and return the payload as raw JSON.
    ///
    /// # Errors
    /// Same as [`RequestGateway::send`].
    pub async fn send_value(&self, descriptor: RequestDescriptor) -> Result<Value, GatewayError> {
        self.send(descriptor).await
    }

    /// # Errors
    /// Same as [`RequestGateway::send`]; params that are not an object fail
    /// with [`GatewayError::PreSend`].
    pub async fn get<P, T>(&self, path: &str, params: &P) -> Result<T, GatewayError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(RequestDescriptor::get(path).params(params)?).await
    }

    /// # Errors
    /// Same as [`RequestGateway::send`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(RequestDescriptor::post(path).json(body)?).await
    }

    /// # Errors
    /// Same as [`RequestGateway::send`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(RequestDescriptor::put(path).json(body)?).await
    }

    /// # Errors
    /// Same as [`RequestGateway::send`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.send(RequestDescriptor::delete(path)).await
    }

    fn prepare(&self, descriptor: RequestDescriptor) -> Result<OutboundRequest, GatewayError> {
        descriptor.validate()?;

        let mut request = OutboundRequest {
            url: resolve_url(&self.base_url, &descriptor.path),
            method: descriptor.method,
            headers: BTreeMap::new(),
            query: descriptor.params,
            body: descriptor.body,
            timeout: self.timeout,
        };

        for interceptor in &self.interceptors {
            if let Err(err) = interceptor.intercept(&mut request) {
                warn!(error = %err, url = %request.url, "request interceptor rejected request");
                return Err(err);
            }
        }

        Ok(request)
    }

    async fn dispatch(&self, request: OutboundRequest) -> Result<TransportResponse, GatewayError> {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!(%method, %url, "sending request");

        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = response.status, "received response");
                Ok(response)
            }
            Err(err) => {
                warn!(%method, %url, error = %err, "transport failure");
                Err(GatewayError::Transport(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use relay_domain::{HttpMethod, TransportError};
    use serde_json::json;

    use super::*;
    use crate::session::SessionStore;

    /// Transport that records every request and answers with a fixed reply
    struct MockTransport {
        requests: Mutex<Vec<OutboundRequest>>,
        reply: Result<TransportResponse, TransportError>,
    }

    impl MockTransport {
        fn replying(body: Value) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                reply: Ok(TransportResponse { status: 200, body: serde_json::to_vec(&body).unwrap() }),
            })
        }

        fn failing(err: TransportError) -> Arc<Self> {
            Arc::new(Self { requests: Mutex::new(Vec::new()), reply: Err(err) })
        }

        fn requests(&self) -> Vec<OutboundRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn execute(
            &self,
            request: OutboundRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().push(request);
            self.reply.clone()
        }
    }

    struct HeaderStamp;

    impl RequestInterceptor for HeaderStamp {
        fn intercept(&self, request: &mut OutboundRequest) -> Result<(), GatewayError> {
            request.insert_header("X-Client", "relay");
            Ok(())
        }
    }

    fn gateway(transport: Arc<MockTransport>, session: Arc<SessionStore>) -> RequestGateway {
        RequestGateway::new(&ApiConfig::new("http://api.test"), transport, session)
    }

    #[tokio::test]
    async fn get_descriptor_builds_expected_transport_call() {
        let transport = MockTransport::replying(json!({ "code": 200, "data": [] }));
        let gateway = gateway(transport.clone(), Arc::new(SessionStore::new()));

        let descriptor = RequestDescriptor::get("/v1/test").params(&json!({ "x": 1 })).unwrap();
        let _: Value = gateway.send(descriptor).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://api.test/v1/test");
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].query, vec![("x".to_string(), "1".to_string())]);
        assert!(requests[0].body.is_none());
        assert_eq!(requests[0].timeout, Duration::from_millis(5000));
    }

    #[tokio::test]
    async fn token_is_read_at_send_time() {
        let transport = MockTransport::replying(json!({ "code": 200 }));
        let session = Arc::new(SessionStore::new());
        let gateway = gateway(transport.clone(), session.clone());

        gateway.send::<()>(RequestDescriptor::get("/a")).await.unwrap();
        session.set_token("t-1");
        gateway.send::<()>(RequestDescriptor::get("/b")).await.unwrap();
        session.clear();
        gateway.send::<()>(RequestDescriptor::get("/c")).await.unwrap();

        let tokens: Vec<_> =
            transport.requests().iter().map(|r| r.header("xtoken").map(str::to_string)).collect();
        assert_eq!(tokens, vec![None, Some("t-1".to_string()), None]);
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn success_resolves_with_data() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Item {
            id: u32,
        }

        let transport = MockTransport::replying(json!({ "code": 200, "data": { "id": 9 } }));
        let gateway = gateway(transport, Arc::new(SessionStore::new()));

        let item: Item = gateway.get("/v1/item", &()).await.unwrap();
        assert_eq!(item, Item { id: 9 });
    }

    #[tokio::test]
    async fn application_failure_rejects_with_message() {
        let transport = MockTransport::replying(json!({ "code": 500, "message": "db down" }));
        let gateway = gateway(transport, Arc::new(SessionStore::new()));

        let err = gateway.send_value(RequestDescriptor::get("/v1/test")).await.unwrap_err();
        assert_eq!(err.to_string(), "db down");
        assert!(!err.is_auth_failure());
    }

    #[tokio::test]
    async fn code_401_is_classified_as_auth_failure() {
        let transport = MockTransport::replying(json!({ "code": 401 }));
        let session = Arc::new(SessionStore::with_token("expired"));
        let gateway = gateway(transport, session.clone());

        let err = gateway.send_value(RequestDescriptor::get("/v1/test")).await.unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.to_string(), "Error");
        // Classification only; the session is untouched
        assert_eq!(session.token().as_deref(), Some("expired"));
    }

    #[tokio::test]
    async fn transport_error_propagates_unchanged() {
        let transport = MockTransport::failing(TransportError::Timeout { timeout_ms: 5000 });
        let gateway = gateway(transport.clone(), Arc::new(SessionStore::new()));

        let err = gateway.send_value(RequestDescriptor::get("/v1/test")).await.unwrap_err();
        assert_eq!(err, GatewayError::Transport(TransportError::Timeout { timeout_ms: 5000 }));
        assert!(err.is_timeout());
        assert_eq!(err.code(), None);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn pre_send_failures_issue_no_request() {
        let transport = MockTransport::replying(json!({ "code": 200 }));
        let gateway =
            gateway(transport.clone(), Arc::new(SessionStore::with_token("line\nbreak")));

        let err = gateway.send_value(RequestDescriptor::get("/v1/test")).await.unwrap_err();
        assert!(matches!(err, GatewayError::PreSend(_)));

        let err = gateway.send_value(RequestDescriptor::get("")).await.unwrap_err();
        assert!(matches!(err, GatewayError::PreSend(_)));

        let err = gateway.get::<_, Value>("/v1/test", &"scalar").await.unwrap_err();
        assert!(matches!(err, GatewayError::PreSend(_)));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn post_sends_json_body_and_extra_interceptors_run() {
        let transport = MockTransport::replying(json!({ "code": 200, "data": "created" }));
        let gateway = gateway(transport.clone(), Arc::new(SessionStore::with_token("t")))
            .with_interceptor(Arc::new(HeaderStamp));

        let result: String = gateway.post("/v1/test", &json!({ "name": "a" })).await.unwrap();
        assert_eq!(result, "created");

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(json!({ "name": "a" })));
        assert_eq!(request.header("x-client"), Some("relay"));
        assert_eq!(request.header("xtoken"), Some("t"));
    }

    #[tokio::test]
    async fn concurrent_sends_are_independent() {
        let transport = MockTransport::replying(json!({ "code": 200, "data": 1 }));
        let gateway = Arc::new(gateway(transport.clone(), Arc::new(SessionStore::new())));

        let calls = (0..8).map(|i| {
            let gateway = gateway.clone();
            async move { gateway.delete::<u8>(&format!("/v1/items/{i}")).await }
        });
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(|r| matches!(r, Ok(1))));
        assert_eq!(transport.requests().len(), 8);
    }
}
