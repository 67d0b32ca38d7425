//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the server can
//! map each failure onto an HTTP status.

use thiserror::Error;

/// Errors that abort an ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// No URL was submitted
    #[error("URL is required")]
    EmptyUrl,

    /// URL could not be parsed or is not http(s)
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// YouTube link without a recognizable video id
    #[error("invalid YouTube URL: {url}")]
    InvalidYouTubeUrl { url: String },

    /// Fetch failed in a way that cannot be degraded
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// AI enhancement failed
    #[error("enhancement error: {0}")]
    Enhancement(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Narration failed
    #[error("narration error: {0}")]
    Narration(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl IngestError {
    /// True when the failure came from SSRF validation.
    pub fn is_blocked(&self) -> bool {
        matches!(self, IngestError::Fetch(FetchError::Security(_)))
    }
}

/// Errors that can occur while fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Security validation failed
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Clone, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost, internal IPs)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    DnsResolution(String),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;
