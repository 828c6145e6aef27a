//! # Relay Infrastructure
//!
//! Implementations of the core ports and everything that touches the outside
//! world.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - Configuration loading (environment, `.env` mode files, JSON/TOML)
//! - The in-memory history router
//! - The API module built on the request gateway
//!
//! ## Architecture
//! - Implements traits defined in `relay-core`
//! - Contains all "impure" code (network, files, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod navigation;

// Re-export commonly used items
pub use api::TestApi;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use navigation::HistoryRouter;
