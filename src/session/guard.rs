use crate::agent::MeetingAgent;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Holds a joined agent until it has been told to leave.
///
/// `release` performs the leave inline. If the guard is dropped while still
/// armed (cancelled request, panic) the leave is spawned onto the runtime.
/// Leave failures, panics included, are logged and never returned.
pub struct LeaveGuard {
    agent: Option<Arc<dyn MeetingAgent>>,
    session_id: String,
}

impl LeaveGuard {
    pub fn new(agent: Arc<dyn MeetingAgent>, session_id: impl Into<String>) -> Self {
        Self {
            agent: Some(agent),
            session_id: session_id.into(),
        }
    }

    /// Leave now. Returns whether a leave was attempted.
    pub async fn release(mut self) -> bool {
        match self.agent.take() {
            Some(agent) => leave_if_joined(agent.as_ref(), &self.session_id).await,
            None => false,
        }
    }
}

impl Drop for LeaveGuard {
    fn drop(&mut self) {
        let Some(agent) = self.agent.take() else {
            return;
        };
        let session_id = std::mem::take(&mut self.session_id);

        warn!(
            "Session {} abandoned before leaving, leaving in background",
            session_id
        );

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    leave_if_joined(agent.as_ref(), &session_id).await;
                });
            }
            Err(_) => error!(
                "No runtime to leave meeting for session {}, agent may remain attached",
                session_id
            ),
        }
    }
}

async fn leave_if_joined(agent: &dyn MeetingAgent, session_id: &str) -> bool {
    let Some(meeting_id) = agent.current_meeting_id().await else {
        info!("Session {}: no confirmed meeting, skipping leave", session_id);
        return false;
    };

    info!(
        "Session {}: live processing ended for {}, ensuring agent leaves",
        session_id, meeting_id
    );

    match AssertUnwindSafe(agent.leave()).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Failed to leave meeting {}: {:?}", meeting_id, e),
        Err(_) => error!("Agent panicked while leaving meeting {}", meeting_id),
    }

    true
}
