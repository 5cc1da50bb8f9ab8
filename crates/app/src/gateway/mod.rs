//! API Gateway

mod client;
mod envelope;
pub mod errors;
pub mod transport;

pub use client::ApiClient;
pub use errors::{ApiError, TransportError};
pub use transport::{HttpTransport, Transport};
