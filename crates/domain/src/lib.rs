//! # Relay Domain
//!
//! Data types shared by every Relay crate.
//!
//! This crate contains:
//! - Error types and Result definitions
//! - Configuration structures
//! - Request descriptors, the response envelope wire contract and navigation
//!   targets
//! - Constants of the backend contract (`xtoken` header, success code)
//!
//! ## Architecture
//! - No dependencies on other Relay crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
