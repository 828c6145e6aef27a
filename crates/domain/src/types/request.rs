//! Outbound request descriptors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{RelayError, Result};

/// HTTP verb of a request descriptor.
///
/// The four verbs the API uses are first-class; anything else is carried to
/// the transport exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Other(verb) => verb,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(RelayError::InvalidInput("HTTP method cannot be empty".into()));
        }

        Ok(match s.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            _ => Self::Other(s.to_string()),
        })
    }
}

/// A single API call as built by a call site.
///
/// Consumed once by the gateway; nothing retains it after the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Path relative to the API base URL, or an absolute URL
    pub path: String,
    pub method: HttpMethod,
    /// Query pairs in the order they will be sent
    #[serde(default)]
    pub params: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self { path: path.into(), method, params: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Append one query pair.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Append the fields of a serializable object as query pairs.
    ///
    /// # Errors
    /// Returns `RelayError::InvalidInput` if `params` does not serialize to
    /// an object (or `null`).
    pub fn params<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        self.params.extend(query_pairs(params)?);
        Ok(self)
    }

    /// Set a JSON body.
    ///
    /// # Errors
    /// Returns `RelayError::InvalidInput` if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| RelayError::InvalidInput(format!("Failed to serialize body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// # Errors
    /// Returns `RelayError::InvalidInput` when the target path is empty or
    /// protocol-relative (`//host/…`); there is no page scheme to borrow.
    pub fn validate(&self) -> Result<()> {
        let path = self.path.trim();
        if path.is_empty() {
            return Err(RelayError::InvalidInput("request path cannot be empty".into()));
        }
        if path.starts_with("//") {
            return Err(RelayError::InvalidInput(format!(
                "protocol-relative path needs an explicit scheme: {path}"
            )));
        }
        Ok(())
    }
}

/// Flatten a serializable object into query pairs.
///
/// Scalars are stringified, `null` fields are dropped, arrays become repeated
/// `key[]` pairs and nested objects are sent as JSON text.
///
/// # Errors
/// Returns `RelayError::InvalidInput` if `params` is not an object.
pub fn query_pairs<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params)
        .map_err(|e| RelayError::InvalidInput(format!("Failed to serialize params: {e}")))?;

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(RelayError::InvalidInput(format!(
                "query parameters must be an object, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let array_key = format!("{key}[]");
                pairs.extend(
                    items
                        .iter()
                        .filter_map(scalar_text)
                        .map(|text| (array_key.clone(), text)),
                );
            }
            other => {
                if let Some(text) = scalar_text(&other) {
                    pairs.push((key, text));
                }
            }
        }
    }

    Ok(pairs)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Join a request path onto the API base URL.
///
/// Absolute URLs (`scheme://…`) are returned unchanged.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() || is_absolute_url(path) {
        return path.to_string();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn is_absolute_url(path: &str) -> bool {
    match path.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
