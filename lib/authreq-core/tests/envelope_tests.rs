//! Check ordering of `Envelope` through the public API.

use assert2::{check, let_assert};
use authreq_core::{Envelope, Error, ResponseError, TransportError, classify};
use bytes::Bytes;

fn body(text: &'static str) -> Option<Bytes> {
    Some(Bytes::from_static(text.as_bytes()))
}

#[test]
fn transport_error_wins_over_status_and_body() {
    let envelope = Envelope::new(
        body(r#"{"email":"alice@example.com"}"#),
        Some(200),
        Some(TransportError::Timeout),
    );

    check!(envelope.result() == Err(ResponseError::Unknown(TransportError::Timeout)));
}

#[test]
fn transport_error_wins_over_failed_status() {
    let envelope = Envelope::new(
        body(r#"{"error":"invalid_grant","error_description":"bad creds"}"#),
        Some(403),
        Some(TransportError::connection("reset")),
    );

    let_assert!(Err(cause) = envelope.result());
    check!(cause == ResponseError::Unknown(TransportError::connection("reset")));
}

#[test]
fn missing_status_wins_over_body() {
    let envelope = Envelope::new(body("not json"), None, None);

    check!(envelope.result() == Err(ResponseError::Unknown(TransportError::MissingResponse)));
}

#[test]
fn failed_status_wins_over_malformed_body() {
    let envelope = Envelope::new(body("<html>"), Some(502), None);

    check!(envelope.result() == Err(ResponseError::RequestFailed { status: 502 }));
}

#[test]
fn classified_body_survives_a_failed_status() {
    let envelope = Envelope::new(
        body(r#"{"code":"user_exists","description":"The user already exists."}"#),
        Some(400),
        None,
    );

    let_assert!(Err(cause) = envelope.result());
    let error = classify(envelope.body().map(Bytes::as_ref), cause);

    check!(error == Error::response("user_exists", "The user already exists."));
}
