use crate::agent::NatsAgentFactory;
use crate::config::Config;
use crate::nats::NatsClient;
use crate::notes::NotionInitializer;
use crate::pipeline::NatsPipeline;
use crate::session::Orchestrator;
use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{error, warn};

/// Shared application state for HTTP handlers
#[derive(Clone, Default)]
pub struct AppState {
    /// `None` when collaborators failed to load at startup
    pub orchestrator: Option<Arc<Orchestrator>>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Some(Arc::new(orchestrator)),
        }
    }

    /// State that answers every attend request with 503
    pub fn unavailable() -> Self {
        Self { orchestrator: None }
    }

    /// Wire the NATS and Notion collaborators from config.
    ///
    /// Falls back to `unavailable()` when NATS is disabled or unreachable.
    pub async fn from_config(cfg: &Config) -> Self {
        match build_orchestrator(cfg).await {
            Ok(orchestrator) => Self::new(orchestrator),
            Err(e) => {
                error!("Agent components not loaded: {:?}", e);
                warn!("Serving in degraded mode, attend requests will return 503");
                Self::unavailable()
            }
        }
    }
}

async fn build_orchestrator(cfg: &Config) -> Result<Orchestrator> {
    if !cfg.nats.enabled {
        bail!("NATS is disabled in config (nats.enabled = false)");
    }

    let nats_client = NatsClient::connect(&cfg.nats.url).await?;

    let agents = NatsAgentFactory::new(
        nats_client.clone(),
        cfg.nats.agent_subject_prefix.clone(),
        cfg.control_timeout(),
    );
    let pipeline = NatsPipeline::new(nats_client, cfg.nats.pipeline_subject.clone());
    let note_store = NotionInitializer::new(
        cfg.notion.api_base.clone(),
        cfg.notion.api_version.clone(),
        cfg.notion.verify_token,
    );

    Ok(Orchestrator::new(
        Arc::new(agents),
        Arc::new(pipeline),
        Arc::new(note_store),
        cfg.orchestrator(),
    ))
}
