//! Inbound request envelope and validation
//!
//! The envelope mirrors the JSON body posted by the action caller:
//! - `action_input` - what meeting to attend and where to file the note
//! - `session_variables` - caller identity
//! - `handler_input` - per-request credentials

mod envelope;
mod validate;

pub use envelope::{ActionInput, AttendRequest, HandlerInput, SessionVariables, CALLER_ID_KEY};
pub use validate::{validate, Credentials, ValidatedRequest, DEFAULT_SOURCE_LABEL};
