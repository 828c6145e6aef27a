use std::sync::Arc;

use relay_core::{RequestGateway, SessionStore};
use relay_domain::ApiConfig;
use relay_infra::HttpClient;
use serde_json::{json, Value};
use wiremock::{MockServer, ResponseTemplate};

/// Gateway wired to a real reqwest transport and the given mock server.
pub fn gateway_for(server: &MockServer, session: Arc<SessionStore>, timeout_ms: u64) -> RequestGateway {
    let config = ApiConfig { timeout_ms, ..ApiConfig::new(server.uri()) };
    let transport = Arc::new(HttpClient::builder().build().expect("http client should build"));
    RequestGateway::new(&config, transport, session)
}

/// 200 response carrying a success envelope around `data`.
pub fn envelope_ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "message": "ok", "data": data }))
}

/// 200 response carrying a failure envelope.
pub fn envelope_err(code: i64, message: Option<&str>) -> ResponseTemplate {
    let body = match message {
        Some(message) => json!({ "code": code, "message": message }),
        None => json!({ "code": code }),
    };
    ResponseTemplate::new(200).set_body_json(body)
}
