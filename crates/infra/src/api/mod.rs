//! Backend API endpoints
//!
//! Thin call sites over the request gateway. Each method maps to one
//! backend route; authentication and envelope handling live in the gateway.

pub mod test_api;

pub use test_api::{TestApi, TEST_ENDPOINT};
