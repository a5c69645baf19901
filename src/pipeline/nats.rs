use super::pipeline::{LivePipeline, PipelineRequest, ProcessingResult};
use crate::nats::{NatsClient, ProcessMeetingRequest};
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

/// Pipeline that hands the meeting to a remote transcription worker
///
/// The worker replies once the meeting ends with a `ProcessingResult` body
/// (or `null` when it has nothing to report).
pub struct NatsPipeline {
    nats_client: NatsClient,
    subject: String,
}

impl NatsPipeline {
    pub fn new(nats_client: NatsClient, subject: String) -> Self {
        Self {
            nats_client,
            subject,
        }
    }
}

#[async_trait::async_trait]
impl LivePipeline for NatsPipeline {
    async fn process(&self, request: PipelineRequest<'_>) -> Result<Option<ProcessingResult>> {
        let message = ProcessMeetingRequest {
            session_id: request.agent.session_id().to_string(),
            meeting_id: request.meeting_id.to_string(),
            note_title: request.note_title.to_string(),
            source_label: request.source_label.to_string(),
            linked_event_id: request.linked_event_id.map(str::to_string),
            database_id: request
                .store_id
                .or(request.note_store.database_id())
                .map(str::to_string),
            note_store_token: request.note_store.token().to_string(),
            speech_api_key: request.speech_api_key.to_string(),
            language_model_key: request.language_model_key.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        };

        info!(
            "Handing meeting {} to pipeline on {} (agent={})",
            request.meeting_id,
            self.subject,
            request.agent.name()
        );

        // Bounded by the orchestrator, not here
        let result: Option<ProcessingResult> = self
            .nats_client
            .request_json(&self.subject, &message, None)
            .await
            .context("Live processing request failed")?;

        Ok(result)
    }
}
