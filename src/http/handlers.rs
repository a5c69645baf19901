use super::state::AppState;
use crate::error::AttendError;
use crate::request::AttendRequest;
use crate::response;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info};

/// POST /
/// Attend a live meeting, process it into a note, and leave
pub async fn attend_live_meeting(
    State(state): State<AppState>,
    payload: Result<Json<AttendRequest>, JsonRejection>,
) -> Response {
    let Some(orchestrator) = state.orchestrator else {
        error!("Attend request rejected: collaborators not loaded");
        return AttendError::ServiceUnavailable.into_response();
    };

    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            error!("Rejected attend payload: {}", rejection);
            return AttendError::InvalidPayload(rejection.body_text()).into_response();
        }
    };

    info!(
        "Attend request received (platform={:?}, meeting={:?})",
        request.action_input.platform, request.action_input.meeting_identifier
    );

    let outcome = orchestrator.attend(&request).await;
    response::into_response(&outcome)
}

/// GET /health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.orchestrator.is_some() {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DEGRADED")
    }
}
