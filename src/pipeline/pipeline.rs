use crate::agent::MeetingAgent;
use crate::notes::NoteStoreClient;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome reported by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProcessingResult {
    /// Note was created; `data` describes the artifact (e.g. page reference)
    Success {
        #[serde(default)]
        data: Value,
    },
    Error {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        details: Option<Value>,
    },
}

impl ProcessingResult {
    pub fn success(data: impl Into<Value>) -> Self {
        Self::Success { data: data.into() }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: Some(code.to_string()),
            message: Some(message.into()),
            details: None,
        }
    }
}

/// Everything the pipeline needs for one joined meeting
pub struct PipelineRequest<'a> {
    /// Agent attending the meeting
    pub agent: &'a dyn MeetingAgent,
    pub meeting_id: &'a str,
    pub note_title: &'a str,
    pub speech_api_key: &'a str,
    pub language_model_key: &'a str,
    /// Target note database, if the caller picked one
    pub store_id: Option<&'a str>,
    pub source_label: &'a str,
    pub linked_event_id: Option<&'a str>,
    /// Request-scoped note store client
    pub note_store: &'a NoteStoreClient,
}

#[async_trait::async_trait]
pub trait LivePipeline: Send + Sync {
    /// Process the live meeting until it ends.
    ///
    /// Anticipated failures should come back as `ProcessingResult::Error`.
    /// `Ok(None)` means the pipeline produced no result at all. `Err` is a
    /// fault and is reported as an internal error.
    async fn process(&self, request: PipelineRequest<'_>) -> Result<Option<ProcessingResult>>;
}
