//! Liveness and readiness. Ready means the database answers and the submissions table exists.

use crate::state::AppState;
use crate::store::SchemaState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
    schema: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let (database, schema) = match state.store.schema_state().await {
        Ok(SchemaState::Ready) => ("ok", "ok"),
        Ok(SchemaState::Missing) => {
            tracing::warn!("readiness: submissions table is missing");
            ("ok", "missing")
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness: database unavailable");
            ("unavailable", "unknown")
        }
    };
    let ok = schema == "ok";
    let code = if ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (
        code,
        Json(Readiness {
            status: if ok { "ready" } else { "not_ready" },
            database,
            schema,
        }),
    )
}

/// GET /health and GET /ready.
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
