//! Application constants
//!
//! Values fixed by the backend contract and the gateway defaults.

/// Header carrying the session token on outbound requests.
pub const TOKEN_HEADER: &str = "xtoken";

/// Envelope code that marks a successful response.
pub const SUCCESS_CODE: i64 = 200;

/// Envelope code that marks an authentication failure.
pub const AUTH_FAILURE_CODE: i64 = 401;

/// Message used when a failed envelope carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Error";

/// Default request timeout for the gateway.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment variables
pub const ENV_API_BASE_URL: &str = "RELAY_API_BASE_URL";
pub const ENV_API_TIMEOUT_MS: &str = "RELAY_API_TIMEOUT_MS";
pub const ENV_USER_AGENT: &str = "RELAY_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "RELAY_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "RELAY_LOG_JSON";
pub const ENV_TOKEN: &str = "RELAY_TOKEN";
