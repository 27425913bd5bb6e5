//! Typed, chainable requests to an authentication service.
//!
//! `authreq` runs the [`authreq_core`] pipeline over a hyper transport:
//! build a [`Request`] (usually through [`AuthClient`]), start it, and receive
//! either the decoded value or an [`Error`] from a closed set.
//!
//! # Example
//!
//! ```ignore
//! use authreq::prelude::*;
//!
//! let client = HyperClient::builder().with_logging().build();
//! let auth = AuthClient::new(client, "https://tenant.auth0.com")?;
//!
//! let signup = auth
//!     .no_body(Method::Post, "/dbconnections/signup")?
//!     .parameter("email", "alice@example.com")
//!     .parameter("password", "secret")
//!     .parameter("connection", "Username-Password-Authentication");
//! let login = auth
//!     .credentials(Method::Post, "/oauth/token")?
//!     .parameter("grant_type", "password")
//!     .parameter("username", "alice@example.com")
//!     .parameter("password", "secret");
//!
//! signup.concat(login).start(|result| match result {
//!     Ok(credentials) => tracing::info!(token_type = %credentials.token_type, "logged in"),
//!     Err(err) => tracing::warn!(error = %err, "sign up failed"),
//! }).await;
//! ```

mod auth_client;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;

pub use auth_client::AuthClient;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use authreq_core::{
    ChainedRequest, Credentials, CredentialsError, Decoder, Envelope, Error, HttpClient,
    HttpRequest, HttpRequestBuilder, HttpResponse, JSON_CONTENT_TYPE, Method, Payload, Request,
    Requestable, ResponseError, Result, StatusCode, TransportError, UserProfile, classify, decode,
    header,
};

// Re-export url for building targets
pub use url;
