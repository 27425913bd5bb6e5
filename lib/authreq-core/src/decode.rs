//! Typed decoders.
//!
//! A decoder turns the validated [`Payload`] of a successful response into the
//! value a [`Request`](crate::Request) promises. Decoders are plain functions:
//! no I/O, called once per successful response, and they report shape
//! mismatches as [`Error::InvalidResponse`] carrying the raw payload.
//!
//! Any `Fn(Payload) -> Result<T>` closure works as a decoder; the functions
//! here cover the common authentication results.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::{Credentials, Error, Payload, Result, UserProfile};

/// Shared decoder function bound to a request.
pub type Decoder<T> = Arc<dyn Fn(Payload) -> Result<T> + Send + Sync>;

fn invalid(payload: Payload) -> Error {
    Error::InvalidResponse(payload.unwrap_or(Value::Null))
}

/// Decode a user profile: `email` is required, `username` and
/// `email_verified` are optional.
pub fn user_profile(payload: Payload) -> Result<UserProfile> {
    let Some(Value::Object(object)) = &payload else {
        return Err(invalid(payload));
    };
    let Some(email) = object.get("email").and_then(Value::as_str) else {
        debug!("profile payload has no string `email`");
        return Err(invalid(payload));
    };

    Ok(UserProfile {
        email: email.to_string(),
        username: object
            .get("username")
            .and_then(Value::as_str)
            .map(str::to_string),
        verified: object
            .get("email_verified")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Accept any successful response, with or without a body.
#[allow(clippy::needless_pass_by_value, clippy::unnecessary_wraps)]
pub fn no_body(_payload: Payload) -> Result<()> {
    Ok(())
}

/// Decode token endpoint credentials through [`Credentials::from_map`].
///
/// String fields are taken as is and numbers are rendered as text, so
/// `"expires_in": 86400` reaches the constructor as `"86400"`. Other value
/// kinds are ignored.
pub fn credentials(payload: Payload) -> Result<Credentials> {
    let Some(Value::Object(object)) = &payload else {
        return Err(invalid(payload));
    };
    let values: HashMap<String, String> = object
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key.clone(), text.clone())),
            Value::Number(number) => Some((key.clone(), number.to_string())),
            _ => None,
        })
        .collect();

    Credentials::from_map(&values).map_err(|err| {
        debug!(error = %err, "credentials payload rejected");
        invalid(payload.clone())
    })
}
