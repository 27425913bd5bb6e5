//! Default header middleware.
//!
//! Adds configured headers to every outgoing request that does not already
//! carry a header of the same name.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::{Layer, Service};

use crate::{HttpRequest, HttpResponse, TransportError};

/// Layer that adds default headers to requests.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeadersLayer {
    headers: Arc<HashMap<String, String>>,
}

impl DefaultHeadersLayer {
    /// Create a layer adding the given headers.
    pub fn new(headers: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            headers: Arc::new(headers.into_iter().collect()),
        }
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeaders {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// Service that adds default headers to requests.
#[derive(Debug, Clone)]
pub struct DefaultHeaders<S> {
    inner: S,
    headers: Arc<HashMap<String, String>>,
}

impl<S> DefaultHeaders<S> {
    fn apply(&self, request: HttpRequest) -> HttpRequest {
        let missing: Vec<(String, String)> = self
            .headers
            .iter()
            .filter(|(name, _)| request.header(name).is_none())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if missing.is_empty() {
            return request;
        }

        let (method, url, headers, body) = request.into_parts();
        let builder = HttpRequest::builder(method, url).headers(headers.into_iter().chain(missing));
        match body {
            Some(body) => builder.body(body).build(),
            None => builder.build(),
        }
    }
}

impl<S> Service<HttpRequest> for DefaultHeaders<S>
where
    S: Service<HttpRequest, Response = HttpResponse, Error = TransportError> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = HttpResponse;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), TransportError>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: HttpRequest) -> Self::Future {
        let request = self.apply(request);
        Box::pin(self.inner.call(request))
    }
}
