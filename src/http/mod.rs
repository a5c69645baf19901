//! HTTP API for attending live meetings
//!
//! - POST / - Attend a meeting until it ends, returning the created note
//! - POST /meetings/attend - Same as `POST /`
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
