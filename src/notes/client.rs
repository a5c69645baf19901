use crate::error::AttendError;
use serde_json::Value;

/// Request-scoped note store client
///
/// Holds the caller's token for the lifetime of one session. The pipeline
/// uses it to create the note once the meeting ends.
#[derive(Clone)]
pub struct NoteStoreClient {
    token: String,
    database_id: Option<String>,
}

impl NoteStoreClient {
    pub fn new(token: String, database_id: Option<String>) -> Self {
        Self { token, database_id }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Target database for new notes, if one was given
    pub fn database_id(&self) -> Option<&str> {
        self.database_id.as_deref()
    }
}

impl std::fmt::Debug for NoteStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStoreClient")
            .field("database_id", &self.database_id)
            .finish_non_exhaustive()
    }
}

/// Failure reported by a note store initializer
#[derive(Debug, Clone, PartialEq)]
pub struct NoteStoreInitError {
    /// Short reason, appended to `NOTE_STORE_INIT_ERROR_`
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<Value>,
}

impl NoteStoreInitError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.to_string()),
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<NoteStoreInitError> for AttendError {
    fn from(err: NoteStoreInitError) -> Self {
        AttendError::NoteStoreInit {
            reason: err.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            message: err
                .message
                .unwrap_or_else(|| "Failed to initialize note store client.".to_string()),
            details: err.details,
        }
    }
}

/// Establishes a note store client from request credentials
#[async_trait::async_trait]
pub trait NoteStoreInitializer: Send + Sync {
    async fn initialize(
        &self,
        token: &str,
        database_id: Option<&str>,
    ) -> Result<NoteStoreClient, NoteStoreInitError>;
}
