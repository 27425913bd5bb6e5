//! The transport capability.
//!
//! [`HttpClient`] is the only thing the pipeline needs from the outside world:
//! turn an [`HttpRequest`] into an [`HttpResponse`] or a [`TransportError`].
//! Connection pooling, TLS and timeouts live behind it. `authreq` ships a
//! hyper-based implementation; tests use scripted stubs.

use std::future::Future;
use std::sync::Arc;

use crate::{HttpRequest, HttpResponse, TransportError};

/// Core HTTP transport trait.
///
/// Implementations perform exactly one round trip per call and must not retry
/// on their own behalf.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful round trip and
    /// is returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response could be obtained.
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}
