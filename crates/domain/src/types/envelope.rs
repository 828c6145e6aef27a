//! Response envelope wire contract
//!
//! Every backend response body has the shape
//! `{ "code": <integer>, "message": <string, optional>, "data": <any> }`.
//! An integer `code` of 200 is the only success discriminant, whatever the
//! HTTP status.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{AUTH_FAILURE_CODE, FALLBACK_ERROR_MESSAGE, SUCCESS_CODE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// `None` when the body carried no integer code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl ResponseEnvelope {
    pub fn success(data: Value) -> Self {
        Self { code: Some(SUCCESS_CODE), message: None, data }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self { code: Some(code), message: Some(message.into()), data: Value::Null }
    }

    /// Read a response body without rejecting it.
    ///
    /// A body that is not JSON reads as an envelope with no fields. A `code`
    /// that is not an integer, or a `message` that is not a string, is
    /// dropped.
    pub fn from_slice(body: &[u8]) -> Self {
        let mut value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        Self {
            code: value.get("code").and_then(Value::as_i64),
            message: value.get("message").and_then(Value::as_str).map(str::to_string),
            data: value.get_mut("data").map(Value::take).unwrap_or(Value::Null),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(SUCCESS_CODE)
    }

    pub fn is_auth_failure(&self) -> bool {
        self.code == Some(AUTH_FAILURE_CODE)
    }

    /// Human-readable failure text: the envelope message, or `"Error"` when
    /// the message is absent or empty.
    pub fn failure_message(&self) -> &str {
        self.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(FALLBACK_ERROR_MESSAGE)
    }
}
