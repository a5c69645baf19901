//! Attendance session orchestration
//!
//! This module drives one live-meeting attendance per request:
//! - Validation of the request envelope
//! - Request-scoped note store setup
//! - Agent join, live processing, and the guaranteed leave
//! - Translation of every outcome into a single `AttendError` or artifact

mod guard;
mod orchestrator;
mod phase;

pub use guard::LeaveGuard;
pub use orchestrator::{AttendOutcome, Orchestrator, OrchestratorConfig};
pub use phase::{Session, SessionPhase};
