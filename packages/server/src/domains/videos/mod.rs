//! Videos domain - recorded talks, interviews and panels

pub mod edges;
pub mod models;
pub mod store;

pub use models::{Video, VideoCategory, VideoInput, VideoStatus};
pub use store::{VideoCounts, VideoStore};
