//! Note store client setup
//!
//! The note store is configured per request from the caller's token. Nothing
//! here is process-wide: two concurrent requests with different tokens each
//! get their own `NoteStoreClient`.

mod client;
mod notion;

pub use client::{NoteStoreClient, NoteStoreInitError, NoteStoreInitializer};
pub use notion::{NotionInitializer, NOTION_API_BASE, NOTION_API_VERSION};
