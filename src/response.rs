//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Serialize)]
pub struct Created<T> {
    pub status: &'static str,
    pub message: &'static str,
    pub id: T,
}

#[derive(Serialize)]
pub struct Page<T, P> {
    pub status: &'static str,
    pub data: Vec<T>,
    pub pagination: P,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

pub fn created<T: Serialize>(message: &'static str, id: T) -> (StatusCode, Json<Created<T>>) {
    (
        StatusCode::CREATED,
        Json(Created {
            status: STATUS_SUCCESS,
            message,
            id,
        }),
    )
}

pub fn page<T: Serialize, P: Serialize>(data: Vec<T>, pagination: P) -> (StatusCode, Json<Page<T, P>>) {
    (
        StatusCode::OK,
        Json(Page {
            status: STATUS_SUCCESS,
            data,
            pagination,
        }),
    )
}

pub fn error_body(message: String) -> ErrorBody {
    ErrorBody {
        status: STATUS_ERROR,
        message,
    }
}
