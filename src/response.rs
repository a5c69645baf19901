//! Uniform wire shape for attend outcomes
//!
//! `{ "ok": true, "data": ... }` on success,
//! `{ "ok": false, "error": { "code", "message", "details" } }` on failure.

use crate::error::AttendError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl From<&AttendError> for ErrorBody {
    fn from(err: &AttendError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Status code and body for an outcome
pub fn format_outcome(outcome: &Result<Value, AttendError>) -> (StatusCode, ApiResponse) {
    match outcome {
        Ok(data) => (
            StatusCode::OK,
            ApiResponse {
                ok: true,
                data: Some(data.clone()),
                error: None,
            },
        ),
        Err(err) => (
            err.status(),
            ApiResponse {
                ok: false,
                data: None,
                error: Some(err.into()),
            },
        ),
    }
}

/// Axum response for an outcome
pub fn into_response(outcome: &Result<Value, AttendError>) -> Response {
    let (status, body) = format_outcome(outcome);
    (status, Json(body)).into_response()
}

impl IntoResponse for AttendError {
    fn into_response(self) -> Response {
        into_response(&Err(self))
    }
}
