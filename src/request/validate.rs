use super::envelope::AttendRequest;
use crate::agent::Platform;
use crate::error::AttendError;

/// Source label used when the caller does not provide one
pub const DEFAULT_SOURCE_LABEL: &str = "Live Meeting Transcription";

/// Per-request credentials. Dropped together with the request.
#[derive(Clone)]
pub struct Credentials {
    pub note_store_token: String,
    pub speech_api_key: String,
    pub language_model_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}

/// A request that passed validation; every required field is present
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub platform: Platform,
    pub meeting_identifier: String,
    pub note_title: String,
    pub source_label: String,
    pub linked_event_id: Option<String>,
    pub target_store_id: Option<String>,
    pub caller_id: String,
    pub credentials: Credentials,
}

/// Check the envelope for required fields and a supported platform.
///
/// All missing fields are reported at once. The platform check only runs
/// once every required field is present.
pub fn validate(
    request: &AttendRequest,
    supported: Platform,
) -> Result<ValidatedRequest, AttendError> {
    let action = &request.action_input;
    let handler = &request.handler_input;

    let required = [
        ("platform", present(&action.platform)),
        ("meeting_identifier", present(&action.meeting_identifier)),
        ("notion_note_title", present(&action.notion_note_title)),
        (
            "user_id (from session)",
            request.session_variables.caller_id().filter(|v| !v.trim().is_empty()),
        ),
        (
            "notion_api_token (from handler_input)",
            present(&handler.notion_api_token),
        ),
        (
            "deepgram_api_key (from handler_input)",
            present(&handler.deepgram_api_key),
        ),
        (
            "openai_api_key (from handler_input)",
            present(&handler.openai_api_key),
        ),
    ];

    let missing: Vec<String> = required
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AttendError::Validation { missing });
    }

    // Presence was checked above
    let field = |i: usize| required[i].1.unwrap_or_default().to_string();

    let platform_raw = field(0);
    let platform = match Platform::parse(&platform_raw) {
        Some(p) if p == supported => p,
        _ => {
            return Err(AttendError::NotImplemented {
                platform: platform_raw,
            })
        }
    };

    Ok(ValidatedRequest {
        platform,
        meeting_identifier: field(1),
        note_title: field(2),
        source_label: action
            .notion_source
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_LABEL.to_string()),
        linked_event_id: action.linked_event_id.clone().filter(|s| !s.is_empty()),
        target_store_id: action.notion_db_id.clone().filter(|s| !s.is_empty()),
        caller_id: field(3),
        credentials: Credentials {
            note_store_token: field(4),
            speech_api_key: field(5),
            language_model_key: field(6),
        },
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
