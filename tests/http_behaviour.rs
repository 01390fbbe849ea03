//! Cross-cutting HTTP behaviour: CORS preflight and headers, operational endpoints, unknown routes.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_bytes, body_json, build_test_app, get, post_json, submission};
use sqlx::PgPool;
use tower::ServiceExt;

fn header<'a>(response: &'a axum::http::Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

// ---------------------------------------------------------------------------
// Test: OPTIONS on either endpoint is 200 with an empty body
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn preflight_is_empty_ok(pool: PgPool) {
    let app = build_test_app(pool).await;
    for uri in ["/insert", "/fetch", "/fetch?page=abc&gender=Nope"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .header("Origin", "http://localhost:8080")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
        assert!(body_bytes(response).await.is_empty(), "{uri}");
    }
}

#[sqlx::test(migrations = false)]
async fn bare_options_is_empty_ok(pool: PgPool) {
    let app = build_test_app(pool).await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/insert")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[sqlx::test(migrations = false)]
async fn preflight_lists_endpoint_methods(pool: PgPool) {
    let app = build_test_app(pool).await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/fetch")
        .header("Origin", "http://localhost:8080")
        .header("Access-Control-Request-Method", "GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let methods = header(&response, "access-control-allow-methods").unwrap_or_default();
    assert!(methods.contains("GET"));
    assert!(methods.contains("OPTIONS"));
    assert!(!methods.contains("POST"));
}

// ---------------------------------------------------------------------------
// Test: CORS headers are present on regular responses, including errors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn cors_headers_on_every_response(pool: PgPool) {
    let app = build_test_app(pool).await;

    let response = get(app.clone(), "/fetch").await;
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert_eq!(header(&response, "access-control-allow-methods"), Some("GET,OPTIONS"));
    let allowed = header(&response, "access-control-allow-headers").unwrap_or_default();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("authorization"));

    let response = post_json(app, "/insert", submission("A1", "x@example.com", "Male")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "access-control-allow-origin"), Some("*"));
    assert_eq!(header(&response, "access-control-allow-methods"), Some("POST,OPTIONS"));
}

#[sqlx::test(migrations = false)]
async fn responses_are_json(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/fetch").await;
    let content_type = header(&response, "content-type").unwrap_or_default();
    assert!(content_type.starts_with("application/json"));
}

// ---------------------------------------------------------------------------
// Test: operational endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn health_and_ready(pool: PgPool) {
    let app = build_test_app(pool).await;

    let json = body_json(get(app.clone(), "/health").await).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "submissions-api");
    assert!(json["version"].is_string());

    let response = get(app, "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ready");
    assert_eq!(json["database"], "ok");
    assert_eq!(json["schema"], "ok");
}

#[sqlx::test(migrations = false)]
async fn ready_reports_missing_table(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    sqlx::query("DROP TABLE submissions").execute(&pool).await.unwrap();
    let response = get(app, "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "not_ready");
    assert_eq!(json["database"], "ok");
    assert_eq!(json["schema"], "missing");
}

#[sqlx::test(migrations = false)]
async fn ready_reports_closed_pool(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    pool.close().await;
    let response = get(app, "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["database"], "unavailable");
    assert_eq!(json["schema"], "unknown");
}

#[sqlx::test(migrations = false)]
async fn storage_failure_is_generic_500(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    pool.close().await;
    let response = get(app, "/fetch").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Database connection failed");
}

#[sqlx::test(migrations = false)]
async fn unknown_route_is_404(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn oversized_body_is_rejected(pool: PgPool) {
    let app = build_test_app(pool).await;
    let big = "x".repeat(128 * 1024);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/insert")
        .header("content-type", "application/json")
        .header("content-length", big.len())
        .body(Body::from(big))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[sqlx::test(migrations = false)]
async fn schema_init_is_idempotent(pool: PgPool) {
    let store = submissions_api::SubmissionStore::from_pool(pool);
    store.ensure_schema().await.unwrap();
    store.ensure_schema().await.unwrap();
}
