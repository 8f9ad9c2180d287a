//! Integration tests for the HTTP API.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`; no
//! listener is bound.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body::Frame;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use kubemock_server::{create_app, create_router, AppState};

const TOKEN_REVIEW: &str = "/apis/authentication.k8s.io/v1/tokenreviews";
const REGISTER: &str = "/api/v1/testing/serviceaccounts";
const RESET: &str = "/api/v1/testing/reset";
const HEALTH: &str = "/api/v1/testing/health";

fn app() -> Router {
    create_router(Arc::new(AppState::new()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body.to_string()).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, uid: &str, name: &str, namespace: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        REGISTER,
        json!({ "uid": uid, "name": name, "namespace": namespace }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    assert_eq!(body["success"], true);
    body["jwt"].as_str().expect("jwt in response").to_string()
}

async fn review(app: &Router, token: &str) -> Value {
    let (status, body) =
        send_json(app, "POST", TOKEN_REVIEW, json!({ "spec": { "token": token } })).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn register_then_review_returns_canonical_username() {
    let app = app();
    let token = register(&app, "12345", "my-service", "default").await;

    let body = review(&app, &token).await;
    assert_eq!(body["apiVersion"], "authentication.k8s.io/v1");
    assert_eq!(body["kind"], "TokenReview");
    assert_eq!(body["status"]["authenticated"], true);
    assert_eq!(
        body["status"]["user"]["username"],
        "system:serviceaccount:default:my-service"
    );
    assert_eq!(body["status"]["user"]["uid"], "12345");
}

#[tokio::test]
async fn review_accepts_put() {
    let app = app();
    let token = register(&app, "1", "svc", "ns").await;

    let (status, body) =
        send_json(&app, "PUT", TOKEN_REVIEW, json!({ "spec": { "token": token } })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["authenticated"], true);
}

#[tokio::test]
async fn unknown_token_is_not_an_error() {
    let app = app();
    let body = review(&app, "never-issued").await;
    assert_eq!(body["status"], json!({ "authenticated": false }));
}

#[tokio::test]
async fn malformed_review_is_bad_request_and_registry_unchanged() {
    let app = app();
    let token = register(&app, "12345", "my-service", "default").await;

    let (status, bytes) = send(&app, "POST", TOKEN_REVIEW, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid login request"));

    assert_eq!(review(&app, &token).await["status"]["authenticated"], true);
}

#[tokio::test]
async fn malformed_registration_is_bad_request_and_registry_unchanged() {
    let app = app();
    let token = register(&app, "12345", "my-service", "default").await;

    let (status, bytes) = send(&app, "POST", REGISTER, "[1, 2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid service account registration request"));

    assert_eq!(review(&app, &token).await["status"]["authenticated"], true);
}

#[tokio::test]
async fn reset_without_body_invalidates_all_tokens() {
    let app = app();
    let a = register(&app, "1", "a", "ns").await;
    let b = register(&app, "2", "b", "ns").await;

    let (status, body) = send_json(&app, "DELETE", RESET, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 2);

    assert_eq!(review(&app, &a).await["status"]["authenticated"], false);
    assert_eq!(review(&app, &b).await["status"]["authenticated"], false);
}

#[tokio::test]
async fn reset_with_empty_list_and_empty_body() {
    let app = app();
    let a = register(&app, "1", "a", "ns").await;

    let (status, _) = send_json(&app, "DELETE", RESET, json!({ "uids": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review(&app, &a).await["status"]["authenticated"], false);

    let b = register(&app, "2", "b", "ns").await;
    let (status, _) = send(&app, "DELETE", RESET, Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review(&app, &b).await["status"]["authenticated"], false);
}

#[tokio::test]
async fn reset_with_null_uids_invalidates_all_tokens() {
    let app = app();
    let a = register(&app, "1", "a", "ns").await;
    let b = register(&app, "2", "b", "ns").await;

    let (status, body) = send_json(&app, "DELETE", RESET, json!({ "uids": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["removed"], 2);

    assert_eq!(review(&app, &a).await["status"]["authenticated"], false);
    assert_eq!(review(&app, &b).await["status"]["authenticated"], false);
}

#[tokio::test]
async fn reset_with_keys_matches_tokens_only() {
    let app = app();
    let a = register(&app, "uid-a", "a", "ns").await;
    let b = register(&app, "uid-b", "b", "ns").await;

    // Uids are not registry keys.
    let (status, body) = send_json(&app, "DELETE", RESET, json!({ "uids": ["uid-a"] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 0);
    assert_eq!(review(&app, &a).await["status"]["authenticated"], true);

    let (status, body) = send_json(&app, "DELETE", RESET, json!({ "uids": [a.as_str()] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 1);
    assert_eq!(review(&app, &a).await["status"]["authenticated"], false);
    assert_eq!(review(&app, &b).await["status"]["authenticated"], true);
}

#[tokio::test]
async fn malformed_reset_is_bad_request() {
    let app = app();
    let token = register(&app, "1", "svc", "ns").await;

    let (status, _) = send(&app, "DELETE", RESET, "{\"uids\": 7}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(review(&app, &token).await["status"]["authenticated"], true);
}

#[tokio::test]
async fn health_probe() {
    let app = app();
    let (status, body) = send(&app, "GET", HEALTH, Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn health_rejects_head() {
    let app = app();
    let (status, _) = send(&app, "HEAD", HEALTH, Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn wrong_method_is_not_implemented() {
    let app = app();

    let cases = [
        (
            "GET",
            REGISTER,
            r#"service account registration handler expects POST but got "GET""#,
        ),
        ("POST", HEALTH, r#"health handler expects GET but got "POST""#),
        ("POST", RESET, r#"reset handler expects DELETE but got "POST""#),
        (
            "GET",
            TOKEN_REVIEW,
            r#"login request must be either PUT or POST but got "GET""#,
        ),
    ];

    for (method, uri, message) in cases {
        let (status, body) = send_json(&app, method, uri, Value::Null).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{method} {uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn unknown_route_echoes_target() {
    let app = app();
    let (status, body) =
        send_json(&app, "GET", "/api/v1/namespaces?watch=true", Value::Null).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "unimplemented request: /api/v1/namespaces?watch=true"
    );
}

#[tokio::test]
async fn concurrent_registrations_over_http() {
    let app = app();

    let mut handles = Vec::new();
    for i in 0..6 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let uid = format!("uid-{i}");
            let token = register(&app, &uid, &format!("svc-{i}"), "parallel").await;
            (uid, token)
        }));
    }

    let mut issued = Vec::new();
    for h in handles {
        issued.push(h.await.unwrap());
    }

    for (uid, token) in issued {
        let body = review(&app, &token).await;
        assert_eq!(body["status"]["user"]["uid"], uid);
    }
}

/// A request body whose bytes never arrive.
struct StalledBody;

impl http_body::Body for StalledBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Pending
    }
}

#[tokio::test]
async fn read_deadline_does_not_cut_registration_short() {
    let state = Arc::new(AppState::new());
    // Far shorter than RSA key generation; the body itself arrives at once.
    let app = create_app(Arc::clone(&state), Duration::from_millis(1));

    let token = register(&app, "12345", "my-service", "default").await;

    assert_eq!(state.service.registry().len(), 1);
    assert_eq!(review(&app, &token).await["status"]["authenticated"], true);
}

#[tokio::test]
async fn stalled_registration_body_times_out_without_registering() {
    let state = Arc::new(AppState::new());
    let app = create_app(Arc::clone(&state), Duration::from_millis(50));

    let (status, _) = send(&app, "POST", REGISTER, Body::new(StalledBody)).await;
    assert!(status.is_client_error(), "unexpected status {status}");
    assert!(state.service.registry().is_empty());
}
