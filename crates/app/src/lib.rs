//! # Relay App
//!
//! Application layer for the `relay` command-line tool.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Request commands executed by the CLI
//! - Logging setup and helpers
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the gateway to the reqwest transport and the session store

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::{parse_key_val, send_request, test_get, test_post, RequestArgs};
pub use context::AppContext;
