//! Tower middleware layers for the authreq transport.
//!
//! Layers wrap the raw hyper service inside [`HyperClient`](crate::HyperClient).
//! The first layer added through the builder is the outermost one.
//!
//! - [`LoggingLayer`] - logs requests/responses using `tracing`
//! - [`DefaultHeadersLayer`] - adds headers the request does not set itself
//!
//! ```ignore
//! use authreq::HyperClient;
//! use authreq::middleware::DefaultHeadersLayer;
//!
//! let client = HyperClient::builder()
//!     .with_logging()
//!     .layer(DefaultHeadersLayer::new([("Auth0-Client".to_string(), telemetry)]))
//!     .build();
//! ```

mod default_headers;
mod logging;

pub use default_headers::{DefaultHeaders, DefaultHeadersLayer};
pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
