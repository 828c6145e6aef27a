//! `/v1/test` endpoint

use std::sync::Arc;

use relay_core::{GatewayError, RequestGateway};
use relay_domain::RequestDescriptor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

pub const TEST_ENDPOINT: &str = "/v1/test";

/// API calls for the test resource
#[derive(Clone)]
pub struct TestApi {
    gateway: Arc<RequestGateway>,
}

impl TestApi {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// `GET /v1/test` with `params` as the query string.
    ///
    /// # Errors
    /// Any [`GatewayError`] raised by the gateway.
    #[instrument(skip_all)]
    pub async fn test_get<P, R>(&self, params: &P) -> Result<R, GatewayError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.gateway.send(RequestDescriptor::get(TEST_ENDPOINT).params(params)?).await
    }

    /// `POST /v1/test` with `data` as the JSON body.
    ///
    /// # Errors
    /// Any [`GatewayError`] raised by the gateway.
    #[instrument(skip_all)]
    pub async fn test_post<B, R>(&self, data: &B) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.gateway.send(RequestDescriptor::post(TEST_ENDPOINT).json(data)?).await
    }
}
