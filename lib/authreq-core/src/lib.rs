//! Core request pipeline for authreq.
//!
//! This crate turns calls to an authentication service into typed results:
//!
//! - [`Request`] - a lazily started call bound to a [decoder](decode)
//! - [`ChainedRequest`] - two requests run in sequence, via [`Requestable::concat`]
//! - [`Envelope`] - validation of raw transport outcomes
//! - [`classify`] - recognition of structured server errors
//! - [`Error`] and [`Result`] - what callers receive
//! - [`HttpClient`] - the transport capability the pipeline runs on
//! - [`Credentials`] and [`UserProfile`] - values produced by the stock decoders
//!
//! The pipeline for one call is: build the [`HttpRequest`], execute it through
//! the [`HttpClient`], validate the outcome in an [`Envelope`], then either
//! decode the payload or [`classify`] the failure.

mod chain;
mod classify;
mod client;
pub mod decode;
mod envelope;
mod error;
mod http_request;
mod http_response;
mod method;
mod model;
pub mod prelude;
mod request;

pub use chain::ChainedRequest;
pub use classify::classify;
pub use client::HttpClient;
pub use decode::Decoder;
pub use envelope::{Envelope, Payload, SUCCESS_STATUS};
pub use error::{Error, ResponseError, Result, TransportError};
pub use http_request::{HttpRequest, HttpRequestBuilder, JSON_CONTENT_TYPE};
pub use http_response::HttpResponse;
pub use method::Method;
pub use model::{Credentials, CredentialsError, UserProfile};
pub use request::{Request, Requestable};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
