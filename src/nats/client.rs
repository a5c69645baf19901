use anyhow::{Context, Result};
use async_nats::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Request/reply client for the agent and pipeline workers
#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Connect to NATS server
    ///
    /// The client-wide request timeout is disabled: processing replies only
    /// arrive when the meeting ends. Callers pass their own bound per request.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::ConnectOptions::new()
            .request_timeout(None)
            .connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    /// Send a JSON request and decode the JSON reply
    pub async fn request_json<Req, Resp>(
        &self,
        subject: &str,
        request: &Req,
        timeout: Option<Duration>,
    ) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(request)?;

        debug!("Requesting {} (bytes={})", subject, payload.len());

        let pending = self.client.request(subject.to_string(), payload.into());
        let reply = match timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .with_context(|| format!("No reply on {} within {:?}", subject, limit))?,
            None => pending.await,
        }
        .with_context(|| format!("Request on {} failed", subject))?;

        serde_json::from_slice(&reply.payload)
            .with_context(|| format!("Invalid reply payload on {}", subject))
    }
}
