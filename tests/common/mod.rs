// Fake collaborators shared by the orchestrator and HTTP tests.
//
// Every fake records its calls in a `CallLog` so tests can check how many
// agents were built and how many times leave ran.

#![allow(dead_code)]

use anyhow::Result;
use attend_live_meeting::{
    AgentFactory, AttendRequest, LivePipeline, MeetingAgent, NoteStoreClient, NoteStoreInitError,
    NoteStoreInitializer, Orchestrator, OrchestratorConfig, PipelineRequest, Platform,
    ProcessingResult,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct CallLog {
    pub inits: AtomicUsize,
    pub agents_created: AtomicUsize,
    pub joins: AtomicUsize,
    pub leaves: AtomicUsize,
    pub pipeline_calls: AtomicUsize,
    /// Meeting id the pipeline was handed
    pub processed_meeting_id: Mutex<Option<String>>,
    /// Database id the note store was initialized with
    pub init_database_id: Mutex<Option<String>>,
}

impl CallLog {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Agent
// ============================================================================

#[derive(Clone)]
pub enum AgentBehavior {
    /// Join succeeds and the platform confirms this id (None = echo request)
    Join { confirmed_id: Option<String> },
    /// Join reports true but never records a meeting id
    JoinUnconfirmed,
    /// Join fails
    Refuse,
    /// Join succeeds, leave returns an error
    JoinLeaveFails,
    /// Join succeeds, leave panics
    JoinLeavePanics,
}

pub struct FakeAgent {
    log: Arc<CallLog>,
    behavior: AgentBehavior,
    session_id: String,
    current: tokio::sync::Mutex<Option<String>>,
}

#[async_trait::async_trait]
impl MeetingAgent for FakeAgent {
    async fn join(&self, meeting_identifier: &str) -> bool {
        self.log.joins.fetch_add(1, Ordering::SeqCst);
        let confirmed = match &self.behavior {
            AgentBehavior::Refuse => return false,
            AgentBehavior::JoinUnconfirmed => return true,
            AgentBehavior::Join { confirmed_id } => confirmed_id
                .clone()
                .unwrap_or_else(|| meeting_identifier.to_string()),
            AgentBehavior::JoinLeaveFails | AgentBehavior::JoinLeavePanics => {
                meeting_identifier.to_string()
            }
        };
        *self.current.lock().await = Some(confirmed);
        true
    }

    async fn current_meeting_id(&self) -> Option<String> {
        self.current.lock().await.clone()
    }

    async fn leave(&self) -> Result<()> {
        self.log.leaves.fetch_add(1, Ordering::SeqCst);
        let was_active = self.current.lock().await.take().is_some();
        match self.behavior {
            AgentBehavior::JoinLeaveFails if was_active => {
                anyhow::bail!("bot crashed while leaving")
            }
            AgentBehavior::JoinLeavePanics if was_active => panic!("bot vanished while leaving"),
            _ => {}
        }
        Ok(())
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn name(&self) -> &str {
        "fake-agent"
    }
}

pub struct FakeAgentFactory {
    pub log: Arc<CallLog>,
    pub behavior: AgentBehavior,
}

impl AgentFactory for FakeAgentFactory {
    fn create(&self, _platform: Platform, session_id: &str, _caller_id: &str) -> Arc<dyn MeetingAgent> {
        self.log.agents_created.fetch_add(1, Ordering::SeqCst);
        Arc::new(FakeAgent {
            log: Arc::clone(&self.log),
            behavior: self.behavior.clone(),
            session_id: session_id.to_string(),
            current: tokio::sync::Mutex::new(None),
        })
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[derive(Clone)]
pub enum PipelineBehavior {
    Succeed(Value),
    Report(ProcessingResult),
    ReturnNone,
    Fault(String),
    Panic,
    /// Never finishes (meeting that does not end)
    Hang,
}

pub struct FakePipeline {
    pub log: Arc<CallLog>,
    pub behavior: PipelineBehavior,
}

#[async_trait::async_trait]
impl LivePipeline for FakePipeline {
    async fn process(&self, request: PipelineRequest<'_>) -> Result<Option<ProcessingResult>> {
        self.log.pipeline_calls.fetch_add(1, Ordering::SeqCst);
        *self.log.processed_meeting_id.lock().unwrap() = Some(request.meeting_id.to_string());

        match &self.behavior {
            PipelineBehavior::Succeed(data) => Ok(Some(ProcessingResult::success(data.clone()))),
            PipelineBehavior::Report(result) => Ok(Some(result.clone())),
            PipelineBehavior::ReturnNone => Ok(None),
            PipelineBehavior::Fault(message) => {
                Err(anyhow::anyhow!(message.clone()).context("Live processing request failed"))
            }
            PipelineBehavior::Panic => panic!("transcriber exploded"),
            PipelineBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

// ============================================================================
// Note store
// ============================================================================

pub struct FakeNoteStore {
    pub log: Arc<CallLog>,
    pub failure: Option<NoteStoreInitError>,
}

#[async_trait::async_trait]
impl NoteStoreInitializer for FakeNoteStore {
    async fn initialize(
        &self,
        token: &str,
        database_id: Option<&str>,
    ) -> Result<NoteStoreClient, NoteStoreInitError> {
        self.log.inits.fetch_add(1, Ordering::SeqCst);
        *self.log.init_database_id.lock().unwrap() = database_id.map(str::to_string);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(NoteStoreClient::new(
                token.to_string(),
                database_id.map(str::to_string),
            )),
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

pub struct Harness {
    pub agent: AgentBehavior,
    pub pipeline: PipelineBehavior,
    pub note_store_failure: Option<NoteStoreInitError>,
    pub max_processing: Option<Duration>,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            agent: AgentBehavior::Join { confirmed_id: None },
            pipeline: PipelineBehavior::Succeed(json!("page1")),
            note_store_failure: None,
            max_processing: Some(Duration::from_secs(30)),
        }
    }
}

impl Harness {
    pub fn build(self) -> (Orchestrator, Arc<CallLog>) {
        let log = Arc::new(CallLog::default());
        let orchestrator = Orchestrator::new(
            Arc::new(FakeAgentFactory {
                log: Arc::clone(&log),
                behavior: self.agent,
            }),
            Arc::new(FakePipeline {
                log: Arc::clone(&log),
                behavior: self.pipeline,
            }),
            Arc::new(FakeNoteStore {
                log: Arc::clone(&log),
                failure: self.note_store_failure,
            }),
            OrchestratorConfig {
                platform: Platform::Zoom,
                max_processing: self.max_processing,
            },
        );
        (orchestrator, log)
    }
}

/// A complete, valid request body
pub fn valid_body() -> Value {
    json!({
        "action_input": {
            "platform": "zoom",
            "meeting_identifier": "123",
            "notion_note_title": "T"
        },
        "session_variables": { "x-hasura-user-id": "u1" },
        "handler_input": {
            "notion_api_token": "a",
            "deepgram_api_key": "b",
            "openai_api_key": "c"
        }
    })
}

pub fn request_from(body: Value) -> AttendRequest {
    serde_json::from_value(body).unwrap()
}

pub fn valid_request() -> AttendRequest {
    request_from(valid_body())
}
