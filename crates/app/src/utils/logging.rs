use std::time::Duration;

use anyhow::anyhow;
use relay_core::{GatewayError, GatewayErrorCategory};
use relay_domain::LoggingConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `verbosity` (`-v` count) raises the configured level to `debug` or
/// `trace`. Logs go to stderr so stdout stays clean for payloads.
///
/// # Errors
/// Fails if the filter directive is invalid or a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig, verbosity: u8, force_json: bool) -> anyhow::Result<()> {
    let directive = match verbosity {
        0 => config.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| anyhow!("invalid log filter '{directive}': {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if config.json || force_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("failed to initialize tracing: {e}"))
}

/// Log the outcome of a request with structured fields.
///
/// Callers must avoid forwarding sensitive values in `path`.
#[inline]
pub fn log_request_outcome(
    method: &str,
    path: &str,
    elapsed: Duration,
    error: Option<&GatewayError>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(method, path, duration_ms, "request_success"),
        Some(err) => warn!(
            method,
            path,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "request_failure"
        ),
    }
}

/// Convert a `GatewayError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &GatewayError) -> &'static str {
    match error.category() {
        GatewayErrorCategory::PreSend => "pre_send",
        GatewayErrorCategory::Transport if error.is_timeout() => "timeout",
        GatewayErrorCategory::Transport => "transport",
        GatewayErrorCategory::Application => "application",
        GatewayErrorCategory::Authentication => "auth",
    }
}
