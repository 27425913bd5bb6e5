//! Validation of raw transport outcomes.
//!
//! An [`Envelope`] collects whatever the transport produced for one call (a
//! body, a status, a transport failure, any combination of them) and reduces
//! it to a single [`Payload`] or [`ResponseError`]. The checks run in a fixed
//! priority order; the first one that applies wins:
//!
//! 1. transport failure → [`ResponseError::Unknown`]
//! 2. no status → [`ResponseError::Unknown`]
//! 3. status outside `200..300` → [`ResponseError::RequestFailed`]
//! 4. no body → `Ok(None)` for `204`, [`ResponseError::NoResponse`] otherwise
//! 5. body is not JSON → [`ResponseError::InvalidJson`]
//! 6. otherwise → `Ok(Some(json))`

use std::ops::Range;

use bytes::Bytes;
use http::StatusCode;

use crate::{HttpResponse, ResponseError, TransportError};

/// Status codes accepted as success.
pub const SUCCESS_STATUS: Range<u16> = 200..300;

/// A validated JSON payload; `None` when a `204` carried no body.
pub type Payload = Option<serde_json::Value>;

/// Raw outcome of one HTTP call.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    body: Option<Bytes>,
    status: Option<u16>,
    error: Option<TransportError>,
}

impl Envelope {
    /// Creates an envelope from its raw parts. An empty body counts as absent.
    #[must_use]
    pub fn new(body: Option<Bytes>, status: Option<u16>, error: Option<TransportError>) -> Self {
        Self {
            body: body.filter(|bytes| !bytes.is_empty()),
            status,
            error,
        }
    }

    /// Response body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// HTTP status, if the transport got that far.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Transport failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    /// Reduce the raw outcome to a payload or a validation failure.
    pub fn result(&self) -> Result<Payload, ResponseError> {
        if let Some(error) = &self.error {
            return Err(ResponseError::Unknown(error.clone()));
        }
        let Some(status) = self.status else {
            return Err(ResponseError::Unknown(TransportError::MissingResponse));
        };
        if !SUCCESS_STATUS.contains(&status) {
            return Err(ResponseError::RequestFailed { status });
        }
        let Some(body) = &self.body else {
            return if status == StatusCode::NO_CONTENT.as_u16() {
                Ok(None)
            } else {
                Err(ResponseError::NoResponse)
            };
        };
        serde_json::from_slice(body)
            .map(Some)
            .map_err(|err| ResponseError::InvalidJson(err.to_string()))
    }
}

impl From<HttpResponse> for Envelope {
    fn from(response: HttpResponse) -> Self {
        let (status, _, body) = response.into_parts();
        Self::new(Some(body), Some(status), None)
    }
}

impl From<TransportError> for Envelope {
    fn from(error: TransportError) -> Self {
        Self::new(None, None, Some(error))
    }
}

impl From<Result<HttpResponse, TransportError>> for Envelope {
    fn from(outcome: Result<HttpResponse, TransportError>) -> Self {
        outcome.map_or_else(Self::from, Self::from)
    }
}
