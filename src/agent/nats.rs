use super::agent::{AgentFactory, MeetingAgent, Platform};
use crate::nats::{
    JoinMeetingReply, JoinMeetingRequest, LeaveMeetingReply, LeaveMeetingRequest, NatsClient,
};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Agent that asks a remote meeting bot to join and leave over NATS
///
/// Subjects: `{subject_prefix}.{platform}.join` and `{subject_prefix}.{platform}.leave`
pub struct NatsMeetingAgent {
    nats_client: NatsClient,
    platform: Platform,
    session_id: String,
    caller_id: String,
    subject_prefix: String,
    control_timeout: Duration,

    /// Meeting id confirmed by the worker, cleared on leave
    current_meeting_id: RwLock<Option<String>>,
}

impl NatsMeetingAgent {
    pub fn new(
        nats_client: NatsClient,
        platform: Platform,
        session_id: String,
        caller_id: String,
        subject_prefix: String,
        control_timeout: Duration,
    ) -> Self {
        Self {
            nats_client,
            platform,
            session_id,
            caller_id,
            subject_prefix,
            control_timeout,
            current_meeting_id: RwLock::new(None),
        }
    }

    fn subject(&self, verb: &str) -> String {
        format!("{}.{}.{}", self.subject_prefix, self.platform, verb)
    }
}

#[async_trait::async_trait]
impl MeetingAgent for NatsMeetingAgent {
    async fn join(&self, meeting_identifier: &str) -> bool {
        info!(
            "Agent joining meeting {} for user {} (session={})",
            meeting_identifier, self.caller_id, self.session_id
        );

        let request = JoinMeetingRequest {
            session_id: self.session_id.clone(),
            caller_id: self.caller_id.clone(),
            platform: self.platform,
            meeting_identifier: meeting_identifier.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        };

        let reply: JoinMeetingReply = match self
            .nats_client
            .request_json(&self.subject("join"), &request, Some(self.control_timeout))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!("Failed to reach meeting agent worker: {:?}", e);
                return false;
            }
        };

        if !reply.joined {
            warn!(
                "Agent could not join meeting {}: {}",
                meeting_identifier,
                reply.message.as_deref().unwrap_or("no reason given")
            );
            return false;
        }

        let confirmed = reply
            .meeting_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| meeting_identifier.to_string());

        info!("Agent joined meeting {}", confirmed);

        *self.current_meeting_id.write().await = Some(confirmed);
        true
    }

    async fn current_meeting_id(&self) -> Option<String> {
        self.current_meeting_id.read().await.clone()
    }

    async fn leave(&self) -> Result<()> {
        // Clear first so a second call is a no-op even if this one fails
        let meeting_id = match self.current_meeting_id.write().await.take() {
            Some(id) => id,
            None => {
                info!("Agent has no active meeting (session={})", self.session_id);
                return Ok(());
            }
        };

        info!("Agent leaving meeting {}", meeting_id);

        let request = LeaveMeetingRequest {
            session_id: self.session_id.clone(),
            meeting_id: meeting_id.clone(),
            timestamp: Utc::now().to_rfc3339(),
        };

        let reply: LeaveMeetingReply = self
            .nats_client
            .request_json(&self.subject("leave"), &request, Some(self.control_timeout))
            .await
            .context("Failed to send leave request")?;

        if !reply.left {
            anyhow::bail!(
                "Worker did not confirm leaving {}: {}",
                meeting_id,
                reply.message.unwrap_or_default()
            );
        }

        info!("Agent left meeting {}", meeting_id);
        Ok(())
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn name(&self) -> &str {
        "nats-meeting-agent"
    }
}

/// Builds one `NatsMeetingAgent` per session on a shared connection
pub struct NatsAgentFactory {
    nats_client: NatsClient,
    subject_prefix: String,
    control_timeout: Duration,
}

impl NatsAgentFactory {
    pub fn new(nats_client: NatsClient, subject_prefix: String, control_timeout: Duration) -> Self {
        Self {
            nats_client,
            subject_prefix,
            control_timeout,
        }
    }
}

impl AgentFactory for NatsAgentFactory {
    fn create(&self, platform: Platform, session_id: &str, caller_id: &str) -> Arc<dyn MeetingAgent> {
        Arc::new(NatsMeetingAgent::new(
            self.nats_client.clone(),
            platform,
            session_id.to_string(),
            caller_id.to_string(),
            self.subject_prefix.clone(),
            self.control_timeout,
        ))
    }
}
