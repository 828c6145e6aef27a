//! Application context - dependency injection container

use std::sync::Arc;

use relay_core::{RequestGateway, SessionStore};
use relay_domain::{Config, Result};
use relay_infra::{HttpClient, TestApi};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub gateway: Arc<RequestGateway>,
    pub test_api: TestApi,
}

impl AppContext {
    /// Wire the gateway, its transport and the session store from `config`.
    ///
    /// # Errors
    /// Returns `RelayError::Config` if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut http = HttpClient::builder().timeout(config.api.timeout());
        if let Some(agent) = &config.api.user_agent {
            http = http.user_agent(agent.clone());
        }
        let transport = Arc::new(http.build()?);

        let session = Arc::new(SessionStore::new());
        let gateway = Arc::new(RequestGateway::new(&config.api, transport, session.clone()));
        let test_api = TestApi::new(gateway.clone());

        info!(
            base_url = %config.api.base_url,
            timeout_ms = config.api.timeout_ms,
            "Application context initialized"
        );

        Ok(Self { config, session, gateway, test_api })
    }
}

#[cfg(test)]
mod tests {
    use relay_domain::{ApiConfig, LoggingConfig, RelayError};
    use serde_json::json;
    use wiremock::matchers::header;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config(base_url: &str) -> Config {
        Config { api: ApiConfig::new(base_url), logging: LoggingConfig::default() }
    }

    #[test]
    fn rejects_invalid_config() {
        let result = AppContext::new(config("nowhere"));
        assert!(matches!(result, Err(RelayError::Config(_))));
    }

    #[tokio::test]
    async fn gateway_reads_the_context_session() {
        let server = MockServer::start().await;
        Mock::given(header("xtoken", "from-login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "data": "hi" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ctx = AppContext::new(config(&server.uri())).unwrap();
        ctx.session.set_token("from-login");

        let greeting: String = ctx.test_api.test_get(&()).await.unwrap();
        assert_eq!(greeting, "hi");
    }
}
