use crate::agent::Platform;
use crate::notes::{NOTION_API_BASE, NOTION_API_VERSION};
use crate::session::OrchestratorConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable that overrides the listen port
pub const PORT_ENV: &str = "PORT";

/// Listen port when neither the config file nor `PORT` set one
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub session: SessionConfig,
    pub nats: NatsConfig,
    pub notion: NotionConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "attend-live-meeting".to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Supported meeting platform
    pub platform: Platform,

    /// Upper bound on live processing in seconds (0 = wait for the meeting to end)
    pub max_duration_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Zoom,
            max_duration_secs: 4 * 60 * 60, // 4 hours
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NatsConfig {
    /// `false` serves in degraded mode without connecting
    pub enabled: bool,

    pub url: String,

    /// Agent subjects are `{agent_subject_prefix}.{platform}.join|leave`
    pub agent_subject_prefix: String,

    pub pipeline_subject: String,

    /// Timeout for join/leave control requests in seconds
    pub control_timeout_secs: u64,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "nats://localhost:4222".to_string(),
            agent_subject_prefix: "meeting.agent".to_string(),
            pipeline_subject: "meeting.pipeline.process".to_string(),
            control_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    pub api_base: String,
    pub api_version: String,

    /// Check each request's token against the API before joining
    pub verify_token: bool,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_base: NOTION_API_BASE.to_string(),
            api_version: NOTION_API_VERSION.to_string(),
            verify_token: true,
        }
    }
}

impl Config {
    /// Load from an optional config file, then `ATTEND__*` environment
    /// variables, then `PORT`.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("ATTEND")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut cfg: Config = settings.try_deserialize()?;

        if let Ok(port) = std::env::var(PORT_ENV) {
            cfg.service.http.port = port
                .parse()
                .with_context(|| format!("Invalid {} value: {}", PORT_ENV, port))?;
        }

        Ok(cfg)
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            platform: self.session.platform,
            max_processing: match self.session.max_duration_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }

    pub fn control_timeout(&self) -> Duration {
        Duration::from_secs(self.nats.control_timeout_secs)
    }
}
