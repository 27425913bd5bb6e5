//! Pipeline tests for `Request` and `ChainedRequest` against a scripted transport.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use authreq_core::{
    Error, HttpClient, HttpRequest, HttpResponse, JSON_CONTENT_TYPE, Method, Payload, Request,
    Requestable, ResponseError, Result, TransportError, UserProfile, decode,
};
use bytes::Bytes;
use serde_json::{Value, json};

// ============================================================================
// Test doubles
// ============================================================================

type Outcome = std::result::Result<HttpResponse, TransportError>;

/// Transport that replays scripted outcomes and records what it was sent.
#[derive(Clone, Default)]
struct StubClient {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl StubClient {
    fn replying(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            sent: Arc::default(),
        }
    }

    fn calls(&self) -> usize {
        self.sent.lock().expect("lock").len()
    }

    fn last_sent(&self) -> HttpRequest {
        self.sent
            .lock()
            .expect("lock")
            .last()
            .cloned()
            .expect("a request was sent")
    }
}

impl HttpClient for StubClient {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = std::result::Result<HttpResponse, TransportError>> + Send {
        self.sent.lock().expect("lock").push(request);
        let outcome = self
            .outcomes
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::connection("no scripted outcome")));
        async move { outcome }
    }
}

fn reply(status: u16, body: &str) -> Outcome {
    Ok(HttpResponse::new(status, HashMap::new(), Bytes::from(body.to_string())))
}

/// Records every callback invocation so tests can assert "exactly once".
struct CallbackRecorder<T> {
    calls: Arc<AtomicUsize>,
    result: Arc<Mutex<Option<Result<T>>>>,
}

impl<T: Send + 'static> CallbackRecorder<T> {
    fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            result: Arc::new(Mutex::new(None)),
        }
    }

    fn callback(&self) -> impl FnOnce(Result<T>) + Send + 'static {
        let calls = Arc::clone(&self.calls);
        let result = Arc::clone(&self.result);
        move |outcome| {
            calls.fetch_add(1, Ordering::SeqCst);
            *result.lock().expect("lock") = Some(outcome);
        }
    }

    fn into_single_result(self) -> Result<T> {
        assert_eq!(
            self.calls.load(Ordering::SeqCst),
            1,
            "callback must fire exactly once"
        );
        self.result
            .lock()
            .expect("lock")
            .take()
            .expect("callback stored a result")
    }
}

const TOKEN_BODY: &str = r#"{"access_token":"at","token_type":"Bearer"}"#;

fn url(path: &str) -> url::Url {
    url::Url::parse("https://tenant.auth0.com")
        .and_then(|base| base.join(path))
        .expect("valid URL")
}

fn post<T, D>(client: &StubClient, path: &str, decoder: D) -> Request<T, StubClient>
where
    D: Fn(Payload) -> Result<T> + Send + Sync + 'static,
{
    Request::new(client.clone(), Method::Post, url(path), decoder)
}

fn profile_request(client: &StubClient) -> Request<UserProfile, StubClient> {
    Request::new(client.clone(), Method::Get, url("/userinfo"), decode::user_profile)
        .header("Authorization", "Bearer at")
}

// ============================================================================
// Request
// ============================================================================

#[tokio::test]
async fn start_delivers_decoded_value_once() {
    let client = StubClient::replying([reply(
        200,
        r#"{"email":"alice@example.com","email_verified":true}"#,
    )]);
    let recorder = CallbackRecorder::new();

    profile_request(&client).start(recorder.callback()).await;

    let_assert!(Ok(profile) = recorder.into_single_result());
    check!(profile.email == "alice@example.com");
    check!(profile.verified);
    check!(client.calls() == 1);
}

#[tokio::test]
async fn start_delivers_failure_once() {
    let client = StubClient::replying([Err(TransportError::Timeout)]);
    let recorder = CallbackRecorder::new();

    profile_request(&client).start(recorder.callback()).await;

    let_assert!(Err(err) = recorder.into_single_result());
    check!(err == Error::Unknown(ResponseError::Unknown(TransportError::Timeout)));
}

#[tokio::test]
async fn dispatched_request_carries_json_parameters() {
    let client = StubClient::replying([reply(200, TOKEN_BODY)]);
    let request = post(&client, "/oauth/token", decode::credentials)
        .parameter("grant_type", "password")
        .parameter("username", "alice@example.com");

    let credentials = request.execute().await.expect("credentials");
    check!(credentials.access_token == "at");

    let sent = client.last_sent();
    check!(sent.method() == Method::Post);
    check!(sent.url().as_str() == "https://tenant.auth0.com/oauth/token");
    check!(sent.header("Content-Type") == Some(JSON_CONTENT_TYPE));
    let body: Value = serde_json::from_slice(sent.body().expect("body")).expect("JSON body");
    check!(body == json!({"grant_type": "password", "username": "alice@example.com"}));
}

#[tokio::test]
async fn server_error_payload_is_classified() {
    let client = StubClient::replying([reply(
        403,
        r#"{"error":"invalid_grant","error_description":"Wrong email or password."}"#,
    )]);

    let result = profile_request(&client).execute().await;

    check!(result == Err(Error::response("invalid_grant", "Wrong email or password.")));
}

#[tokio::test]
async fn unrecognized_failure_body_keeps_status_cause() {
    let client = StubClient::replying([reply(500, r#"{"foo":"bar"}"#)]);

    let result = profile_request(&client).execute().await;

    check!(result == Err(Error::Unknown(ResponseError::RequestFailed { status: 500 })));
}

#[tokio::test]
async fn missing_body_on_ok_is_no_response() {
    let client = StubClient::replying([reply(200, "")]);

    let result = profile_request(&client).execute().await;

    check!(result == Err(Error::Unknown(ResponseError::NoResponse)));
}

#[tokio::test]
async fn no_content_reaches_no_body_decoder() {
    let client = StubClient::replying([reply(204, "")]);
    let request = post(&client, "/dbconnections/change_password", decode::no_body);

    let result = request.execute().await;

    check!(result == Ok(()));
}

#[tokio::test]
async fn malformed_json_is_invalid_json() {
    let client = StubClient::replying([reply(200, "<html>oops</html>")]);

    let result = profile_request(&client).execute().await;

    let_assert!(Err(Error::Unknown(ResponseError::InvalidJson(_))) = result);
}

#[tokio::test]
async fn decoder_mismatch_is_invalid_response() {
    let client = StubClient::replying([reply(200, r#"{"name":"alice"}"#)]);

    let result = profile_request(&client).execute().await;

    check!(result == Err(Error::InvalidResponse(json!({"name": "alice"}))));
}

#[tokio::test]
async fn custom_decoder_closure() {
    let client = StubClient::replying([reply(200, r#"{"_id":"abc123","email":"a@b.c"}"#)]);
    let request = post(&client, "/dbconnections/signup", |payload: Payload| {
        payload
            .as_ref()
            .and_then(|value| value.get("_id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidResponse(payload.unwrap_or(Value::Null)))
    });

    let result = request.execute().await;

    check!(result == Ok("abc123".to_string()));
}

#[tokio::test]
async fn every_start_is_a_new_round_trip() {
    let client = StubClient::replying([
        reply(200, r#"{"email":"first@example.com"}"#),
        reply(200, r#"{"email":"second@example.com"}"#),
    ]);
    let request = profile_request(&client);

    let first = request.execute().await.expect("first");
    let second = request.execute().await.expect("second");

    check!(first.email == "first@example.com");
    check!(second.email == "second@example.com");
    check!(client.calls() == 2);
}

#[tokio::test]
async fn parameters_set_before_start_are_sent() {
    let client = StubClient::replying([reply(204, "")]);
    let mut request = post(&client, "/passwordless/start", decode::no_body);
    request.set_parameter("connection", "email");

    request.execute().await.expect("sent");

    let sent = client.last_sent();
    let body: Value = serde_json::from_slice(sent.body().expect("body")).expect("JSON");
    check!(body == json!({"connection": "email"}));
}

// ============================================================================
// ChainedRequest
// ============================================================================

#[tokio::test]
async fn chain_short_circuits_on_first_failure() {
    let first_client = StubClient::replying([reply(
        400,
        r#"{"code":"user_exists","description":"The user already exists."}"#,
    )]);
    let second_client = StubClient::replying([reply(200, TOKEN_BODY)]);
    let signup = post(&first_client, "/dbconnections/signup", decode::no_body);
    let login = post(&second_client, "/oauth/token", decode::credentials);
    let recorder = CallbackRecorder::new();

    signup.concat(login).start(recorder.callback()).await;

    let result = recorder.into_single_result();
    check!(result == Err(Error::response("user_exists", "The user already exists.")));
    check!(first_client.calls() == 1);
    check!(second_client.calls() == 0);
}

#[tokio::test]
async fn chain_forwards_second_success() {
    let client = StubClient::replying([
        reply(200, r#"{"_id":"abc123","email":"alice@example.com"}"#),
        reply(200, r#"{"access_token":"at","token_type":"Bearer","expires_in":86400}"#),
    ]);
    let signup = post(&client, "/dbconnections/signup", decode::no_body);
    let login = post(&client, "/oauth/token", decode::credentials);
    let recorder = CallbackRecorder::new();

    signup.concat(login).start(recorder.callback()).await;

    let_assert!(Ok(credentials) = recorder.into_single_result());
    check!(credentials.expires_in == Some(86_400));
    check!(client.calls() == 2);
    check!(client.last_sent().url().path() == "/oauth/token");
}

#[tokio::test]
async fn chain_forwards_second_failure_verbatim() {
    let client = StubClient::replying([reply(204, ""), Err(TransportError::connection("reset"))]);
    let first = post(&client, "/dbconnections/signup", decode::no_body);
    let second = profile_request(&client);

    let result = first.concat(second).execute().await;

    check!(result == Err(Error::from(TransportError::connection("reset"))));
    check!(client.calls() == 2);
}

#[tokio::test]
async fn chains_nest() {
    let client = StubClient::replying([
        reply(204, ""),
        reply(204, ""),
        reply(200, r#"{"email":"alice@example.com","username":"alice"}"#),
    ]);
    let step = |path: &str| post(&client, path, decode::no_body);

    let chain = step("/one").concat(step("/two")).concat(profile_request(&client));
    let profile = chain.execute().await.expect("profile");

    check!(profile.username.as_deref() == Some("alice"));
    check!(client.calls() == 3);
}
