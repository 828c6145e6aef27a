//! # Relay Core
//!
//! Request pipeline logic with no transport code.
//!
//! This crate contains:
//! - The request gateway and its interceptors
//! - The client session store read by the gateway
//! - The navigation helper
//! - Port interfaces (traits) implemented by `relay-infra`
//!
//! ## Architecture Principles
//! - Only depends on `relay-domain`
//! - No HTTP client, file system, or environment access
//! - All external collaborators via traits

pub mod gateway;
pub mod navigation;
pub mod session;

pub use gateway::{
    unwrap_envelope, GatewayError, GatewayErrorCategory, HttpTransport, OutboundRequest,
    RequestGateway, RequestInterceptor, TokenHeaderInterceptor, TransportResponse,
};
pub use navigation::{Navigator, Router};
pub use session::{SessionStore, TokenSource};
