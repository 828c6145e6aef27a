//! Navigation helper
//!
//! Forward navigation that is skipped when the target is already the current
//! route.

pub mod ports;
pub mod service;

pub use ports::Router;
pub use service::Navigator;
