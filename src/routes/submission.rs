//! Submission routes. Each endpoint carries its own CORS policy listing only its methods;
//! OPTIONS is answered by the CORS layer with 200 and an empty body.

use crate::handlers::{fetch, insert, method_not_allowed};
use crate::state::AppState;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{on, post, MethodFilter};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

const ALLOW_HEADERS: &str = "content-type, authorization";

fn cors(methods: [Method; 2]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Wraps `router` so every response, not only preflight, advertises the endpoint's methods and headers.
fn with_cors(router: Router<AppState>, allow_methods: &'static str, methods: [Method; 2]) -> Router<AppState> {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(allow_methods),
        ))
        .layer(cors(methods))
}

/// POST /insert and GET /fetch. `/fetch` is GET only; `get()` would also answer HEAD.
pub fn submission_routes(state: AppState) -> Router {
    let insert_route = Router::new().route("/insert", post(insert).fallback(method_not_allowed));
    let fetch_route = Router::new().route("/fetch", on(MethodFilter::GET, fetch).fallback(method_not_allowed));
    Router::new()
        .merge(with_cors(insert_route, "POST,OPTIONS", [Method::POST, Method::OPTIONS]))
        .merge(with_cors(fetch_route, "GET,OPTIONS", [Method::GET, Method::OPTIONS]))
        .with_state(state)
}
