use super::guard::LeaveGuard;
use super::phase::{Session, SessionPhase};
use crate::agent::{AgentFactory, MeetingAgent, Platform};
use crate::error::AttendError;
use crate::notes::{NoteStoreClient, NoteStoreInitializer};
use crate::pipeline::{LivePipeline, PipelineRequest, ProcessingResult};
use crate::request::{validate, AttendRequest, ValidatedRequest};
use futures::FutureExt;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Artifact on success, one structured error otherwise
pub type AttendOutcome = Result<Value, AttendError>;

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// The one platform requests may ask for
    pub platform: Platform,

    /// Upper bound on live processing; `None` waits for the meeting to end
    pub max_processing: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Zoom,
            max_processing: Some(Duration::from_secs(4 * 60 * 60)), // 4 hours
        }
    }
}

/// Runs validate -> initialize -> join -> process -> leave for each request
///
/// Holds no per-request state; every call to `attend` builds its own session,
/// agent and note store client.
pub struct Orchestrator {
    agents: Arc<dyn AgentFactory>,
    pipeline: Arc<dyn LivePipeline>,
    note_store: Arc<dyn NoteStoreInitializer>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        agents: Arc<dyn AgentFactory>,
        pipeline: Arc<dyn LivePipeline>,
        note_store: Arc<dyn NoteStoreInitializer>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            agents,
            pipeline,
            note_store,
            config,
        }
    }

    /// Attend the requested meeting and return its note artifact
    pub async fn attend(&self, request: &AttendRequest) -> AttendOutcome {
        let mut session = Session::new();

        let outcome = match AssertUnwindSafe(self.run(&mut session, request))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => Err(AttendError::internal(&anyhow::anyhow!(
                panic_message(panic.as_ref())
            ))),
        };

        session.advance(SessionPhase::Done);
        match &outcome {
            Ok(_) => info!(
                "Session {} succeeded after {:.1}s",
                session.id,
                session.elapsed_secs()
            ),
            Err(e) => warn!(
                "Session {} failed after {:.1}s: {} ({})",
                session.id,
                session.elapsed_secs(),
                e.code(),
                e
            ),
        }

        outcome
    }

    async fn run(&self, session: &mut Session, request: &AttendRequest) -> AttendOutcome {
        session.advance(SessionPhase::Validating);
        let request = validate(request, self.config.platform)?;

        session.advance(SessionPhase::Initializing);
        let note_store = self
            .note_store
            .initialize(
                &request.credentials.note_store_token,
                request.target_store_id.as_deref(),
            )
            .await?;

        session.advance(SessionPhase::Joining);
        let agent = self
            .agents
            .create(request.platform, &session.id, &request.caller_id);

        info!(
            "Session {}: attempting to join meeting {} for user {}",
            session.id, request.meeting_identifier, request.caller_id
        );

        if !agent.join(&request.meeting_identifier).await {
            error!(
                "Session {}: agent failed to join {}",
                session.id, request.meeting_identifier
            );
            return Err(AttendError::JoinMeetingFailed {
                meeting_identifier: request.meeting_identifier.clone(),
            });
        }

        let guard = LeaveGuard::new(Arc::clone(&agent), session.id.clone());

        let meeting_id = agent
            .current_meeting_id()
            .await
            .unwrap_or_else(|| request.meeting_identifier.clone());
        session.meeting_id = Some(meeting_id.clone());

        session.advance(SessionPhase::Processing);
        let outcome = self
            .process(agent.as_ref(), &meeting_id, &request, &note_store)
            .await;

        session.advance(SessionPhase::Leaving);
        guard.release().await;

        outcome
    }

    /// Run the pipeline, translating timeouts, faults and panics
    async fn process(
        &self,
        agent: &dyn MeetingAgent,
        meeting_id: &str,
        request: &ValidatedRequest,
        note_store: &NoteStoreClient,
    ) -> AttendOutcome {
        let call = AssertUnwindSafe(self.pipeline.process(PipelineRequest {
            agent,
            meeting_id,
            note_title: &request.note_title,
            speech_api_key: &request.credentials.speech_api_key,
            language_model_key: &request.credentials.language_model_key,
            store_id: request.target_store_id.as_deref(),
            source_label: &request.source_label,
            linked_event_id: request.linked_event_id.as_deref(),
            note_store,
        }))
        .catch_unwind();

        let result = match self.config.max_processing {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    error!(
                        "Live processing for {} exceeded {}s",
                        meeting_id,
                        limit.as_secs()
                    );
                    return Err(AttendError::Processing {
                        code: AttendError::PROCESSING_FAILED.to_string(),
                        message: format!(
                            "Live processing exceeded the {}s session limit.",
                            limit.as_secs()
                        ),
                        details: Some(json!({ "timeout_secs": limit.as_secs() })),
                    });
                }
            },
            None => call.await,
        };

        match result {
            Err(panic) => Err(AttendError::internal(&anyhow::anyhow!(
                "Pipeline panicked: {}",
                panic_message(panic.as_ref())
            ))),
            Ok(Err(e)) => Err(AttendError::internal(&e)),
            Ok(Ok(None)) => Err(AttendError::ProcessingReturnedNone),
            Ok(Ok(Some(ProcessingResult::Success { data }))) => {
                info!("Note processed for {}: {}", meeting_id, data);
                Ok(data)
            }
            Ok(Ok(Some(ProcessingResult::Error {
                code,
                message,
                details,
            }))) => {
                let message = message.unwrap_or_else(|| "Processing failed".to_string());
                error!("Processing for {} finished with error: {}", meeting_id, message);
                // Namespaced so a pipeline code never reads as one of ours
                Err(AttendError::Processing {
                    code: match code.filter(|c| !c.is_empty()) {
                        Some(c) => format!("{}_{}", AttendError::PROCESSING_FAILED, c),
                        None => AttendError::PROCESSING_FAILED.to_string(),
                    },
                    message,
                    details,
                })
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
