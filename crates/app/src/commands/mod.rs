//! Request commands executed by the `relay` binary.

use std::future::Future;
use std::time::Instant;

use relay_core::GatewayError;
use relay_domain::{HttpMethod, RequestDescriptor};
use relay_infra::api::TEST_ENDPOINT;
use serde_json::{Map, Value};

use crate::context::AppContext;
use crate::utils::logging::log_request_outcome;

/// A raw request as typed on the command line.
#[derive(Debug, Clone)]
pub struct RequestArgs {
    pub method: HttpMethod,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub data: Option<String>,
}

/// Send `args` through the gateway and return the unwrapped payload.
///
/// # Errors
/// A [`GatewayError::PreSend`] when `--data` is not valid JSON, otherwise
/// whatever the gateway returns.
pub async fn send_request(ctx: &AppContext, args: RequestArgs) -> Result<Value, GatewayError> {
    let method = args.method.to_string();
    let mut descriptor = RequestDescriptor::new(args.method, args.path.clone());
    for (key, value) in args.params {
        descriptor = descriptor.param(key, value);
    }
    if let Some(data) = args.data.as_deref() {
        descriptor = descriptor.body(parse_body(data)?);
    }

    timed(&method, &args.path, ctx.gateway.send_value(descriptor)).await
}

/// `GET /v1/test` with `params` as the query string.
///
/// # Errors
/// Any [`GatewayError`] raised by the gateway.
pub async fn test_get(ctx: &AppContext, params: Vec<(String, String)>) -> Result<Value, GatewayError> {
    let query: Map<String, Value> =
        params.into_iter().map(|(key, value)| (key, Value::String(value))).collect();
    timed("GET", TEST_ENDPOINT, ctx.test_api.test_get::<_, Value>(&query)).await
}

/// `POST /v1/test` with `data` (JSON text) as the body; `null` when omitted.
///
/// # Errors
/// A [`GatewayError::PreSend`] when `data` is not valid JSON, otherwise
/// whatever the gateway returns.
pub async fn test_post(ctx: &AppContext, data: Option<&str>) -> Result<Value, GatewayError> {
    let body = data.map(parse_body).transpose()?.unwrap_or(Value::Null);
    timed("POST", TEST_ENDPOINT, ctx.test_api.test_post::<_, Value>(&body)).await
}

/// Parse a `key=value` argument.
///
/// # Errors
/// Returns a message when `raw` has no `=` or an empty key.
pub fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

/// Await `call` and log its outcome with the elapsed time.
async fn timed<F>(method: &str, path: &str, call: F) -> Result<Value, GatewayError>
where
    F: Future<Output = Result<Value, GatewayError>>,
{
    let started = Instant::now();
    let result = call.await;
    log_request_outcome(method, path, started.elapsed(), result.as_ref().err());
    result
}

fn parse_body(data: &str) -> Result<Value, GatewayError> {
    serde_json::from_str(data).map_err(|e| GatewayError::PreSend(format!("invalid JSON body: {e}")))
}
