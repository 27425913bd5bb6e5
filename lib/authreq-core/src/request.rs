//! Lazily executed, typed requests.
//!
//! A [`Request`] describes one call to an authentication endpoint: method,
//! URL, JSON parameters, extra headers and the [decoder](crate::decode) that
//! produces its result. Nothing happens until it is started, and every start
//! is an independent round trip.
//!
//! # Example
//!
//! ```ignore
//! use authreq_core::{Method, Request, Requestable, decode};
//!
//! let login = Request::new(client.clone(), Method::Post, token_url, decode::credentials)
//!     .parameter("grant_type", "password")
//!     .parameter("username", "alice@example.com")
//!     .parameter("password", "secret");
//!
//! login.start(|result| match result {
//!     Ok(credentials) => println!("token: {}", credentials.access_token),
//!     Err(err) => eprintln!("login failed: {err}"),
//! }).await;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::{Instrument, debug, debug_span};

use crate::{
    ChainedRequest, Envelope, HttpClient, HttpRequest, JSON_CONTENT_TYPE, Method, Payload, Result,
    TransportError, classify, decode::Decoder,
};

// ============================================================================
// Requestable
// ============================================================================

/// Something that can be started to produce a typed result.
///
/// Implemented by [`Request`] and [`ChainedRequest`], so chains can be
/// chained again.
pub trait Requestable: Send + Sync {
    /// Success value.
    type Output: Send;

    /// Perform the call(s) and return the typed result.
    fn execute(&self) -> impl Future<Output = Result<Self::Output>> + Send;

    /// Perform the call(s) and hand the result to `callback`, exactly once.
    ///
    /// Dropping the returned future before completion cancels the call and
    /// the callback is never invoked.
    fn start<F>(&self, callback: F) -> impl Future<Output = ()> + Send
    where
        F: FnOnce(Result<Self::Output>) + Send,
    {
        async move { callback(self.execute().await) }
    }

    /// Run `next` after this one succeeds, keeping only `next`'s result.
    #[must_use]
    fn concat<N>(self, next: N) -> ChainedRequest<Self, N>
    where
        Self: Sized,
        N: Requestable,
    {
        ChainedRequest::new(self, next)
    }
}

// ============================================================================
// Request
// ============================================================================

/// A single typed call, executed through the transport `C`.
pub struct Request<T, C> {
    client: C,
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    parameters: Map<String, Value>,
    decoder: Decoder<T>,
}

impl<T, C> Request<T, C> {
    /// Creates a request with no parameters.
    pub fn new<D>(client: C, method: Method, url: url::Url, decoder: D) -> Self
    where
        D: Fn(Payload) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            client,
            method,
            url,
            headers: HashMap::new(),
            parameters: Map::new(),
            decoder: Arc::new(decoder),
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Extra headers sent with the request.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// JSON parameters sent as the request body.
    #[must_use]
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Mutable access to the parameters, e.g. to fill them in before starting.
    #[must_use]
    pub fn parameters_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.parameters
    }

    /// Sets one parameter.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Adds one parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_parameter(key, value);
        self
    }

    /// Adds several parameters.
    #[must_use]
    pub fn with_parameters(
        mut self,
        parameters: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Adds a header. `Content-Type` is always `application/json` regardless.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Build the transport request for the current state.
    ///
    /// The parameters are sent as a JSON object when the method carries a
    /// body or when any parameter is set.
    pub fn to_http_request(&self) -> std::result::Result<HttpRequest, TransportError> {
        let builder = HttpRequest::builder(self.method, self.url.clone())
            .headers(self.headers.clone())
            .header("Content-Type", JSON_CONTENT_TYPE);

        if !self.method.expects_body() && self.parameters.is_empty() {
            return Ok(builder.build());
        }
        let body = serde_json::to_vec(&self.parameters)
            .map_err(|err| TransportError::invalid_request(err.to_string()))?;
        Ok(builder.body(Bytes::from(body)).build())
    }
}

impl<T, C> Requestable for Request<T, C>
where
    T: Send,
    C: HttpClient,
{
    type Output = T;

    async fn execute(&self) -> Result<T> {
        let span = debug_span!("auth_request", method = %self.method, url = %self.url);
        async move {
            let request = self.to_http_request()?;
            debug!("dispatching request");

            let envelope = Envelope::from(self.client.execute(request).await);
            match envelope.result() {
                Ok(payload) => (self.decoder)(payload),
                Err(cause) => Err(classify(envelope.body().map(Bytes::as_ref), cause)),
            }
        }
        .instrument(span)
        .await
    }
}

impl<T, C: Clone> Clone for Request<T, C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            parameters: self.parameters.clone(),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<T, C> fmt::Debug for Request<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("parameters", &self.parameters.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
