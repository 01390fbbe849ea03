//! Route tables and the assembled application router.

mod status;
mod submission;

pub use status::status_routes;
pub use submission::submission_routes;

use crate::config::ServerConfig;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: submission endpoints, health and readiness, body limit and request tracing.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(status_routes(state.clone()))
        .merge(submission_routes(state))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
