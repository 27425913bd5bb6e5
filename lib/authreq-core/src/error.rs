//! Error types for the request pipeline.
//!
//! Failures are layered the same way the pipeline is:
//!
//! - [`TransportError`]: the [`HttpClient`](crate::HttpClient) could not
//!   produce a response at all.
//! - [`ResponseError`]: a raw outcome failed validation in the
//!   [`Envelope`](crate::Envelope).
//! - [`Error`]: what callers receive. Envelope failures end up as
//!   [`Error::Unknown`] unless the [classifier](crate::classify) recognizes a
//!   structured server error in the body.

use derive_more::{Display, Error, From};

// ============================================================================
// Transport Error
// ============================================================================

/// Failure raised by the transport before any HTTP status was available.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The request could not be built.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// The transport reported neither a failure nor an HTTP status.
    #[display("no HTTP response metadata")]
    #[from(skip)]
    MissingResponse,
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

// ============================================================================
// Response Error
// ============================================================================

/// Why a raw HTTP outcome was rejected by the [`Envelope`](crate::Envelope).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ResponseError {
    /// The transport failed, or gave no status to inspect.
    #[display("transport failure: {_0}")]
    #[from]
    Unknown(TransportError),

    /// The status code is outside `200..300`.
    #[display("request failed with HTTP status {status}")]
    #[from(skip)]
    RequestFailed {
        /// HTTP status code.
        status: u16,
    },

    /// Success status but no body, and the status is not `204 No Content`.
    #[display("no response body")]
    #[from(skip)]
    NoResponse,

    /// The body is not valid JSON.
    #[display("invalid JSON body: {_0}")]
    #[from(skip)]
    InvalidJson(#[error(not(source))] String),
}

impl ResponseError {
    /// Returns the HTTP status code if the request failed on status.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// Domain Error
// ============================================================================

/// Error delivered to callers of a [`Request`](crate::Request).
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum Error {
    /// Nothing more specific could be said; the cause is kept as is.
    #[display("unknown error: {_0}")]
    #[from]
    Unknown(ResponseError),

    /// The server answered with a recognized error payload.
    #[display("{code}: {description}")]
    #[from(skip)]
    Response {
        /// Machine-readable error code, e.g. `invalid_grant`.
        code: String,
        /// Human-readable description.
        description: String,
    },

    /// The JSON payload did not have the shape the decoder expected.
    #[display("invalid response: {_0}")]
    #[from(skip)]
    InvalidResponse(#[error(not(source))] serde_json::Value),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Self::Unknown(ResponseError::Unknown(err))
    }
}

impl Error {
    /// Create a structured server error.
    #[must_use]
    pub fn response(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Response {
            code: code.into(),
            description: description.into(),
        }
    }

    /// The preserved cause of an [`Error::Unknown`].
    #[must_use]
    pub const fn cause(&self) -> Option<&ResponseError> {
        match self {
            Self::Unknown(cause) => Some(cause),
            _ => None,
        }
    }

    /// Server error code of an [`Error::Response`].
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Response { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Server error description of an [`Error::Response`].
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Response { description, .. } => Some(description),
            _ => None,
        }
    }

    /// Returns `true` if the server supplied a structured error.
    #[must_use]
    pub const fn is_response(&self) -> bool {
        matches!(self, Self::Response { .. })
    }

    /// Returns `true` if the payload had an unexpected shape.
    #[must_use]
    pub const fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse(_))
    }

    /// Returns the HTTP status code when the cause is a failed status check.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.cause().and_then(ResponseError::status)
    }
}
