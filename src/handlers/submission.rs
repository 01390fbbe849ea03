//! Submission handlers: insert, fetch, and the 405 fallback shared by both endpoints.

use crate::error::AppError;
use crate::model::Submission;
use crate::response::{created, page};
use crate::service::{FetchParams, SubmissionService};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

pub const INSERTED_MESSAGE: &str = "Data inserted successfully";

pub async fn insert(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let today = chrono::Local::now().date_naive();
    let id = SubmissionService::create(&state.store, &body, today).await?;
    Ok(created(INSERTED_MESSAGE, id))
}

pub async fn fetch(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let params = FetchParams::from(query);
    let result = SubmissionService::list(&state.store, &params).await?;
    Ok(page::<Submission, _>(result.rows, result.pagination))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
