//! Error taxonomy for an attendance session
//!
//! Every failure path of the orchestrator ends in exactly one `AttendError`.
//! The variants map one-to-one onto the wire error codes returned to callers.

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttendError {
    /// Body was not JSON or did not match the envelope shape
    #[error("Request must be JSON: {0}")]
    InvalidPayload(String),

    /// One or more required fields were missing or empty
    #[error("Missing required parameters: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Platform '{platform}' is not supported.")]
    NotImplemented { platform: String },

    /// Collaborators were not constructed at startup
    #[error("Agent components not loaded.")]
    ServiceUnavailable,

    /// Note store client could not be initialized for this request
    #[error("{message}")]
    NoteStoreInit {
        reason: String,
        message: String,
        details: Option<Value>,
    },

    #[error("Agent failed to launch/join meeting: {meeting_identifier}.")]
    JoinMeetingFailed { meeting_identifier: String },

    /// Pipeline reported an explicit failure (or exceeded the session bound).
    /// `code` is `PROCESSING_FAILED` or `PROCESSING_FAILED_<pipeline code>`.
    #[error("{message}")]
    Processing {
        code: String,
        message: String,
        details: Option<Value>,
    },

    #[error("Processing function returned None.")]
    ProcessingReturnedNone,

    /// Unanticipated fault anywhere in the flow
    #[error("An internal error occurred: {0}")]
    Internal(String),
}

impl AttendError {
    pub const PROCESSING_FAILED: &'static str = "PROCESSING_FAILED";

    /// Wire error code
    pub fn code(&self) -> String {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD".to_string(),
            Self::Validation { .. } => "VALIDATION_ERROR".to_string(),
            Self::NotImplemented { .. } => "NOT_IMPLEMENTED".to_string(),
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE".to_string(),
            Self::NoteStoreInit { reason, .. } => format!("NOTE_STORE_INIT_ERROR_{}", reason),
            Self::JoinMeetingFailed { .. } => "JOIN_MEETING_FAILED".to_string(),
            Self::Processing { code, .. } => code.clone(),
            Self::ProcessingReturnedNone => "PROCESSING_RETURNED_NONE".to_string(),
            Self::Internal(_) => "INTERNAL_SERVER_ERROR".to_string(),
        }
    }

    /// HTTP status the formatter should use
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::Validation { .. } | Self::NotImplemented { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Structured details, if any
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::Validation { missing } => Some(json!({ "missing": missing })),
            Self::NotImplemented { platform } => Some(json!({ "platform": platform })),
            Self::NoteStoreInit { details, .. } | Self::Processing { details, .. } => {
                details.clone()
            }
            _ => None,
        }
    }

    /// Translate an unexpected fault, logging the full chain server-side.
    ///
    /// The message keeps every context layer down to the root cause.
    pub fn internal(err: &anyhow::Error) -> Self {
        tracing::error!("Internal fault: {:?}", err);
        Self::Internal(format!("{:#}", err))
    }
}
