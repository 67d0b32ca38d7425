//! Content Ingestion Library
//!
//! Turns a single article or video URL into a normalized [`ExtractedContent`]
//! record ready for editorial review.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ingestion::{HttpFetcher, Pipeline, ValidatedFetcher};
//!
//! let fetcher = ValidatedFetcher::new(HttpFetcher::new()?);
//! let pipeline = Pipeline::builder(fetcher).build();
//!
//! let report = pipeline.ingest("https://www.bbc.co.uk/news/world-123").await?;
//! println!("{} ({})", report.content.title, report.status.as_str());
//! ```
//!
//! # Modules
//!
//! - [`detect`] - URL to source/handler classification
//! - [`html`] - Regex scraping helpers
//! - [`fetch`] - Fetcher trait, HTTP fetcher and SSRF protection
//! - [`handlers`] - Per-source extraction
//! - [`enhance`] - AI summaries/tags and audio narration
//! - [`pipeline`] - End-to-end ingestion
//! - [`text`] - Reading time, slugs and content hashes
//! - [`citations`] - Citation and quotation analysis
//! - [`testing`] - Mock implementations for testing

pub mod citations;
pub mod detect;
pub mod enhance;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod html;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod text;
pub mod types;

// Re-export core types at crate root
pub use detect::detect_content_type;
pub use enhance::{Enhancement, Enhancer, Narration, Narrator, NoopEnhancer, OpenAiEnhancer, PlaceholderNarrator};
pub use error::{FetchError, IngestError, Result, SecurityError};
pub use fetch::{FetchedPage, Fetcher, HttpFetcher, UrlValidator, ValidatedFetcher};
pub use handlers::{ContentHandler, HandlerOutput, HandlerRegistry};
pub use pipeline::{IngestReport, IngestStatus, Pipeline, PipelineBuilder};
pub use security::SecretString;
pub use text::{calculate_reading_time, generate_content_hash, generate_slug};
pub use types::content::ExtractedContent;
pub use types::source::{ContentKind, ContentSource, HandlerKind, KnownSource};
