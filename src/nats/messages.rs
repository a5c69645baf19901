use crate::agent::Platform;
use serde::{Deserialize, Serialize};

/// Ask the agent worker to join a meeting
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinMeetingRequest {
    pub session_id: String,
    pub caller_id: String,
    pub platform: Platform,
    pub meeting_identifier: String,
    pub timestamp: String, // RFC3339 timestamp
}

/// Worker reply to a join request
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinMeetingReply {
    pub joined: bool,
    /// Meeting id as confirmed by the platform
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Ask the agent worker to leave the meeting it joined for this session
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaveMeetingRequest {
    pub session_id: String,
    pub meeting_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaveMeetingReply {
    pub left: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Start live processing for a joined meeting. The reply arrives when the
/// meeting ends.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessMeetingRequest {
    pub session_id: String,
    pub meeting_id: String,
    pub note_title: String,
    pub source_label: String,
    #[serde(default)]
    pub linked_event_id: Option<String>,
    #[serde(default)]
    pub database_id: Option<String>,
    pub note_store_token: String,
    pub speech_api_key: String,
    pub language_model_key: String,
    pub timestamp: String,
}
