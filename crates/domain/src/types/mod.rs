//! Domain types and models

pub mod envelope;
pub mod request;
pub mod route;

pub use envelope::ResponseEnvelope;
pub use request::{query_pairs, resolve_url, HttpMethod, RequestDescriptor};
pub use route::{compose_full_path, NavigationOutcome, NavigationTarget, RouteLocation};
