//! Articles domain - the published writing portfolio
//!
//! Articles are created by the admin, usually from an ingestion result, and
//! only `published` ones are visible on the public endpoints.

pub mod edges;
pub mod filter;
pub mod models;
pub mod store;

pub use models::{Article, ArticleInput, ArticleStatus, PublicationType};
pub use store::{ArticleCounts, ArticleStore};
