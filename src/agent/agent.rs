use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Meeting platform an agent can attend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Zoom,
}

impl Platform {
    /// Case-insensitive parse of a platform name
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zoom" => Some(Self::Zoom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent that attends a live meeting on behalf of a caller
#[async_trait::async_trait]
pub trait MeetingAgent: Send + Sync {
    /// Join the meeting.
    ///
    /// Returns whether the agent actually entered the meeting. Ordinary join
    /// failures are logged and reported as `false`, never as an error.
    async fn join(&self, meeting_identifier: &str) -> bool;

    /// Meeting id confirmed by the last successful join, if still active
    async fn current_meeting_id(&self) -> Option<String>;

    /// Leave the active meeting.
    ///
    /// Must return `Ok(())` when no meeting is active.
    async fn leave(&self) -> Result<()>;

    /// Session this agent was created for
    fn session_id(&self) -> &str;

    /// Agent name for logging
    fn name(&self) -> &str;
}

/// Constructs a fresh agent for each attendance session
pub trait AgentFactory: Send + Sync {
    fn create(&self, platform: Platform, session_id: &str, caller_id: &str) -> Arc<dyn MeetingAgent>;
}
