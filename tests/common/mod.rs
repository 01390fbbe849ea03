//! Shared helpers for HTTP-level tests: build the router over a per-test database and drive it
//! with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use submissions_api::{app, AppState, ServerConfig, SubmissionStore};

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        ensure_database: false,
        ..ServerConfig::default()
    }
}

/// Router over `pool` with the schema already created, same layers as production.
pub async fn build_test_app(pool: PgPool) -> Router {
    let store = SubmissionStore::from_pool(pool);
    store.ensure_schema().await.expect("schema");
    app(AppState { store }, &test_config())
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body.to_string())).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn submission(name: &str, email: &str, gender: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "phone": "+1 555 010 0000",
        "gender": gender,
        "dob": "1990-05-17"
    })
}

/// POST a submission that must succeed; returns its id.
pub async fn insert_ok(app: &Router, body: Value) -> i64 {
    let response = post_json(app.clone(), "/insert", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().expect("id")
}

/// Assert a `{status: "error", message}` envelope and return the message.
pub async fn error_message(response: Response<Body>, expected: StatusCode) -> String {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    json["message"].as_str().expect("message").to_string()
}
