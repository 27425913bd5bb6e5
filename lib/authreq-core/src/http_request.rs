//! Transport-level HTTP request.
//!
//! [`HttpRequest`] is what a [`Request`](crate::Request) hands to the
//! [`HttpClient`](crate::HttpClient): a fully resolved method, URL, header set
//! and optional body. Build one with [`HttpRequest::builder`].
//!
//! # Example
//!
//! ```
//! use authreq_core::{HttpRequest, Method};
//!
//! let url = "https://tenant.auth0.com/userinfo".parse().unwrap();
//! let request = HttpRequest::builder(Method::Get, url)
//!     .header("Authorization", "Bearer token")
//!     .build();
//! assert_eq!(request.header("Authorization"), Some("Bearer token"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Method, TransportError};

/// Content type stamped on every request dispatched by the pipeline.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// An HTTP request with method, URL, headers and optional body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl HttpRequest {
    /// Creates a new [`HttpRequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug, Clone)]
pub struct HttpRequestBuilder {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl HttpRequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any previous value under the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `value` as the JSON body and sets `Content-Type`.
    pub fn json<T: serde::Serialize>(self, value: &T) -> Result<Self, TransportError> {
        let body = serde_json::to_vec(value)
            .map_err(|err| TransportError::invalid_request(err.to_string()))?;
        Ok(self
            .header("Content-Type", JSON_CONTENT_TYPE)
            .body(Bytes::from(body)))
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}
