//! Request gateway
//!
//! Single chokepoint for outbound API calls. A request passes through:
//!
//! 1. request interceptors (session token header first),
//! 2. the [`HttpTransport`] port,
//! 3. envelope unwrapping, which turns `{code, message, data}` into either
//!    the payload or a [`GatewayError`].
//!
//! Nothing is retried. Every failure reaches the caller.

pub mod errors;
pub mod interceptors;
pub mod ports;
pub mod service;

pub use errors::{GatewayError, GatewayErrorCategory};
pub use interceptors::{unwrap_envelope, RequestInterceptor, TokenHeaderInterceptor};
pub use ports::{HttpTransport, OutboundRequest, TransportResponse};
pub use service::RequestGateway;
