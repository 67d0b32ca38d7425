pub mod articles;
pub mod auth;
pub mod citations;
pub mod dashboard;
pub mod inbox;
pub mod ingest;
pub mod videos;
