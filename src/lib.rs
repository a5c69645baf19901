pub mod agent;
pub mod config;
pub mod error;
pub mod http;
pub mod nats;
pub mod notes;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod session;

pub use agent::{AgentFactory, MeetingAgent, NatsAgentFactory, NatsMeetingAgent, Platform};
pub use config::Config;
pub use error::AttendError;
pub use http::{create_router, AppState};
pub use nats::NatsClient;
pub use notes::{NoteStoreClient, NoteStoreInitError, NoteStoreInitializer, NotionInitializer};
pub use pipeline::{LivePipeline, NatsPipeline, PipelineRequest, ProcessingResult};
pub use request::{validate, AttendRequest, ValidatedRequest};
pub use response::{format_outcome, ApiResponse, ErrorBody};
pub use session::{AttendOutcome, LeaveGuard, Orchestrator, OrchestratorConfig, Session, SessionPhase};
