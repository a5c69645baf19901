use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Session variable that carries the caller identity
pub const CALLER_ID_KEY: &str = "x-hasura-user-id";

/// Body of `POST /`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendRequest {
    #[serde(default)]
    pub action_input: ActionInput,

    #[serde(default)]
    pub session_variables: SessionVariables,

    #[serde(default)]
    pub handler_input: HandlerInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionInput {
    pub platform: Option<String>,

    /// Zoom meeting numbers often arrive as JSON numbers
    #[serde(default, deserialize_with = "string_or_number")]
    pub meeting_identifier: Option<String>,
    pub notion_note_title: Option<String>,

    /// Source label written on the note (defaults to "Live Meeting Transcription")
    pub notion_source: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub linked_event_id: Option<String>,

    /// Target database for the note; falls back to the store's default
    #[serde(default, deserialize_with = "string_or_number")]
    pub notion_db_id: Option<String>,
}

/// Accept an identifier given as a string or a number
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "invalid type: {}, expected a string or number",
            other
        ))),
    }
}

/// Session variables as forwarded by the gateway. Values other than the
/// caller id may be of any JSON type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionVariables(pub HashMap<String, Value>);

impl SessionVariables {
    /// Caller identity, only when sent as a string
    pub fn caller_id(&self) -> Option<&str> {
        self.0.get(CALLER_ID_KEY).and_then(Value::as_str)
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct HandlerInput {
    pub notion_api_token: Option<String>,
    pub deepgram_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

// Keep credentials out of logs
impl std::fmt::Debug for HandlerInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("HandlerInput")
            .field("notion_api_token", &redact(&self.notion_api_token))
            .field("deepgram_api_key", &redact(&self.deepgram_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .finish()
    }
}
