use super::client::{NoteStoreClient, NoteStoreInitError, NoteStoreInitializer};
use serde_json::json;
use tracing::{info, warn};

pub const NOTION_API_BASE: &str = "https://api.notion.com";
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Notion-backed initializer
///
/// With `verify_token` set, the token is checked against `/v1/users/me`
/// before the client is handed out.
pub struct NotionInitializer {
    http: reqwest::Client,
    api_base: String,
    api_version: String,
    verify_token: bool,
}

impl NotionInitializer {
    pub fn new(api_base: impl Into<String>, api_version: impl Into<String>, verify_token: bool) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            verify_token,
        }
    }

    async fn verify(&self, token: &str) -> Result<(), NoteStoreInitError> {
        let url = format!("{}/v1/users/me", self.api_base);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("Notion-Version", self.api_version.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!("Note store unreachable: {}", e);
                NoteStoreInitError::new("CONNECTION", "Could not reach the note store.")
                    .with_details(json!({ "cause": e.to_string() }))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Note store rejected token: {}", status);

        let err = if status == reqwest::StatusCode::UNAUTHORIZED {
            NoteStoreInitError::new("UNAUTHORIZED", "Note store token was rejected.")
        } else {
            NoteStoreInitError::new(
                &format!("HTTP_{}", status.as_u16()),
                format!("Note store returned {}", status),
            )
        };

        Err(err.with_details(json!({ "status": status.as_u16(), "body": body })))
    }
}

impl Default for NotionInitializer {
    fn default() -> Self {
        Self::new(NOTION_API_BASE, NOTION_API_VERSION, true)
    }
}

#[async_trait::async_trait]
impl NoteStoreInitializer for NotionInitializer {
    async fn initialize(
        &self,
        token: &str,
        database_id: Option<&str>,
    ) -> Result<NoteStoreClient, NoteStoreInitError> {
        if token.trim().is_empty() {
            return Err(NoteStoreInitError::new(
                "INVALID_TOKEN",
                "Note store token is empty.",
            ));
        }

        if self.verify_token {
            self.verify(token).await?;
        }

        info!(
            "Note store client ready (database={})",
            database_id.unwrap_or("default")
        );

        Ok(NoteStoreClient::new(
            token.to_string(),
            database_id.map(str::to_string),
        ))
    }
}
