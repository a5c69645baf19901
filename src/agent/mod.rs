//! Meeting agent capability
//!
//! An agent is constructed per request, joins one meeting, and must be told to
//! leave once processing ends. Platform-specific implementations:
//! - zoom: `NatsMeetingAgent`, which drives a remote bot worker over NATS

mod agent;
mod nats;

pub use agent::{AgentFactory, MeetingAgent, Platform};
pub use nats::{NatsAgentFactory, NatsMeetingAgent};
