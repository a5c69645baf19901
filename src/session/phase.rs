use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Where an attendance session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Validating,
    Initializing,
    Joining,
    Processing,
    Leaving,
    Done,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Initializing => "initializing",
            Self::Joining => "joining",
            Self::Processing => "processing",
            Self::Leaving => "leaving",
            Self::Done => "done",
        }
    }
}

/// Runtime state of one attendance attempt. Never outlives its request.
#[derive(Debug)]
pub struct Session {
    /// Unique session identifier (e.g., "session-6f1c...")
    pub id: String,

    pub phase: SessionPhase,

    pub started_at: DateTime<Utc>,

    /// Agent-confirmed meeting id, or the requested one as fallback
    pub meeting_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: format!("session-{}", uuid::Uuid::new_v4()),
            phase: SessionPhase::Idle,
            started_at: Utc::now(),
            meeting_id: None,
        }
    }

    /// Move to the next phase, logging the transition
    pub fn advance(&mut self, next: SessionPhase) {
        info!(
            "Session {}: {} -> {}",
            self.id,
            self.phase.as_str(),
            next.as_str()
        );
        self.phase = next;
    }

    pub fn elapsed_secs(&self) -> f64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_milliseconds() as f64
            / 1000.0
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
