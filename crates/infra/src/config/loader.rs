//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Optionally, `.env` mode files are merged into the environment
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `RELAY_API_BASE_URL`: API base URL (required)
//! - `RELAY_API_TIMEOUT_MS`: Request timeout in milliseconds (default 5000)
//! - `RELAY_USER_AGENT`: User agent sent with every request
//! - `RELAY_LOG_LEVEL`: Log filter directive (default `info`)
//! - `RELAY_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## `.env` Files
//! For a mode such as `development`, the following files are read in order
//! of priority. Variables already present in the process environment are
//! never overwritten, so the first file to define a key wins:
//! 1. `.env.development.local`
//! 2. `.env.development`
//! 3. `.env.local`
//! 4. `.env`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` or `./relay.{json,toml}` (current working
//!    directory)
//! 2. `../config.{json,toml}` and `../../config.{json,toml}`
//! 3. Relative to executable location

use std::fmt;
use std::path::{Path, PathBuf};

use relay_domain::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_TIMEOUT_MS, ENV_API_BASE_URL, ENV_API_TIMEOUT_MS, ENV_LOG_JSON,
    ENV_LOG_LEVEL, ENV_USER_AGENT,
};
use relay_domain::{ApiConfig, Config, LoggingConfig, RelayError, Result};

/// Where a configuration was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Environment,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("environment"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// missing, falls back to loading from a config file. The result is
/// validated either way.
///
/// # Errors
/// Returns `RelayError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<Config> {
    load_with_source().map(|(config, _)| config)
}

/// Like [`load`], also reporting which source won.
///
/// Callers that install their subscriber after loading use the source to
/// log where the configuration came from.
///
/// # Errors
/// See [`load`].
pub fn load_with_source() -> Result<(Config, ConfigSource)> {
    let (config, source) = match load_from_env() {
        Ok(config) => (config, ConfigSource::Environment),
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            let path = probe_config_paths().ok_or_else(|| {
                RelayError::Config(
                    "No config file found in any of the standard locations".to_string(),
                )
            })?;
            (load_from_file(Some(path.clone()))?, ConfigSource::File(path))
        }
    };

    config.validate()?;
    tracing::debug!(%source, "Configuration loaded");
    Ok((config, source))
}

/// Load configuration from environment variables
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `RelayError::Config` if `RELAY_API_BASE_URL` is missing or a
/// numeric variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(ENV_API_BASE_URL)?;
    let timeout_ms = match std::env::var(ENV_API_TIMEOUT_MS) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| RelayError::Config(format!("Invalid API timeout: {e}")))?,
        Err(_) => DEFAULT_TIMEOUT_MS,
    };
    let user_agent = std::env::var(ENV_USER_AGENT).ok().filter(|s| !s.is_empty());

    let level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let json = env_bool(ENV_LOG_JSON, false);

    Ok(Config {
        api: ApiConfig { base_url, timeout_ms, user_agent },
        logging: LoggingConfig { level, json },
    })
}

/// Merge `.env` files for `mode` from the current directory into the
/// process environment.
///
/// # Errors
/// See [`load_env_files_from`].
pub fn load_env_files(mode: Option<&str>) -> Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir()
        .map_err(|e| RelayError::Config(format!("Cannot determine working directory: {e}")))?;
    load_env_files_from(&cwd, mode)
}

/// Merge `.env` files for `mode` from `dir` into the process environment.
///
/// Existing variables are kept. Missing files are skipped.
///
/// # Returns
/// The files that were read, highest priority first.
///
/// # Errors
/// Returns `RelayError::Config` if a file exists but cannot be parsed.
pub fn load_env_files_from(dir: &Path, mode: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::with_capacity(4);
    if let Some(mode) = mode.filter(|m| !m.is_empty()) {
        candidates.push(dir.join(format!(".env.{mode}.local")));
        candidates.push(dir.join(format!(".env.{mode}")));
    }
    candidates.push(dir.join(".env.local"));
    candidates.push(dir.join(".env"));

    let mut loaded = Vec::new();
    for path in candidates.into_iter().filter(|p| p.is_file()) {
        dotenvy::from_path(&path).map_err(|e| {
            RelayError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Loaded environment file");
        loaded.push(path);
    }

    Ok(loaded)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RelayError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RelayError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RelayError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::debug!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RelayError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `RelayError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RelayError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RelayError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(RelayError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("relay.json"),
        dir.join("relay.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `RelayError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        RelayError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
