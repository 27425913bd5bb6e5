//! Turning failed responses into domain errors.
//!
//! Authentication endpoints report failures with one of two JSON shapes:
//!
//! ```json
//! {"error": "invalid_grant", "error_description": "Wrong email or password."}
//! {"code": "user_exists", "description": "The user already exists."}
//! ```
//!
//! [`classify`] recognizes both and falls back to [`Error::Unknown`] with the
//! original cause for anything else.

use serde_json::{Map, Value};
use tracing::warn;

use crate::{Error, ResponseError};

/// Field pairs probed in order, as `(code, description)`.
const ERROR_SHAPES: [(&str, &str); 2] = [("error", "error_description"), ("code", "description")];

/// Classify a failed response.
///
/// `body` is the raw failure body, if the server sent one; `cause` is why the
/// envelope rejected the outcome.
#[must_use]
pub fn classify(body: Option<&[u8]>, cause: ResponseError) -> Error {
    let structured = body
        .and_then(|bytes| serde_json::from_slice::<Map<String, Value>>(bytes).ok())
        .and_then(|object| structured_error(&object));

    match structured {
        Some(error) => {
            warn!(cause = %cause, error = %error, "server reported an error");
            error
        }
        None => {
            warn!(cause = %cause, "request failed without a recognized error payload");
            Error::Unknown(cause)
        }
    }
}

fn structured_error(object: &Map<String, Value>) -> Option<Error> {
    ERROR_SHAPES.iter().find_map(|(code, description)| {
        let code = object.get(*code)?.as_str()?;
        let description = object.get(*description)?.as_str()?;
        Some(Error::response(code, description))
    })
}
