//! Ingest domain - runs the pipeline for admins and keeps its history

pub mod edges;
pub mod models;
pub mod store;

pub use models::{IngestionLog, IngestionStatus};
pub use store::{IngestionCounts, IngestionLogStore};
