//! Infrastructure error handling

mod conversions;

pub use conversions::InfraError;
pub(crate) use conversions::IntoTransportError;
