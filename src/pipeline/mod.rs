//! Live processing pipeline capability
//!
//! The pipeline consumes a joined meeting and produces a note artifact. It is
//! injected into the orchestrator; the binary wires `NatsPipeline`.

mod nats;
mod pipeline;

pub use nats::NatsPipeline;
pub use pipeline::{LivePipeline, PipelineRequest, ProcessingResult};
