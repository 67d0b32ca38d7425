//! HTTP-based fetcher implementation.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::redirect::Policy;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FetchedPage, Fetcher, UrlValidator};
use crate::error::{FetchError, FetchResult, SecurityError};

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ContentBot/1.0)";

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 5;

/// HTTP fetcher backed by reqwest.
///
/// One GET per call, no retries. Wrap it in `ValidatedFetcher` before
/// handing it user-submitted URLs.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default settings.
    ///
    /// Redirects are checked against `UrlValidator::new()`.
    pub fn new() -> FetchResult<Self> {
        Self::with_validator(UrlValidator::new())
    }

    /// Create a fetcher that checks every redirect hop and every DNS
    /// answer against `validator`.
    pub fn with_validator(validator: UrlValidator) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(DEFAULT_USER_AGENT)
            .redirect(redirect_policy(validator.clone()))
            .dns_resolver(Arc::new(GuardedResolver { validator }))
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(Self { client })
    }
}

/// Stop at the first redirect hop the validator rejects, before it is requested.
fn redirect_policy(validator: UrlValidator) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        match validator.validate(attempt.url().as_str()) {
            Ok(()) => attempt.follow(),
            Err(e) => {
                warn!(target_url = %redact_url(attempt.url().as_str()), error = %e, "Redirect blocked");
                attempt.error(e)
            }
        }
    })
}

/// DNS resolver that refuses names resolving into blocked ranges.
///
/// IP-literal hosts never reach the resolver; `redirect_policy` covers those.
struct GuardedResolver {
    validator: UrlValidator,
}

impl Resolve for GuardedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let validator = self.validator.clone();
        Box::pin(async move {
            let host = name.as_str().to_string();
            let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
                .await
                .map_err(|e| SecurityError::DnsResolution(e.to_string()))?
                .collect();

            for addr in &addrs {
                validator.check_resolved(&host, addr.ip())?;
            }

            let addrs: Addrs = Box::new(addrs.into_iter());
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(addrs)
        })
    }
}

/// Find a `SecurityError` raised by the redirect policy or the resolver.
fn security_cause(err: &reqwest::Error) -> Option<SecurityError> {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(security) = cause.downcast_ref::<SecurityError>() {
            return Some(security.clone());
        }
        source = std::error::Error::source(cause);
    }
    None
}

/// Replace the value of any `key` query parameter so API keys stay out of logs.
fn redact_url(raw: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(raw) else {
        return raw.to_string();
    };
    if !parsed.query_pairs().any(|(k, _)| k == "key") {
        return raw.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "REDACTED".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        let logged = redact_url(url);
        debug!(url = %logged, "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!(url = %logged, error = %e, "HTTP request failed");
            if let Some(security) = security_cause(&e) {
                FetchError::Security(security)
            } else if e.is_timeout() {
                FetchError::Timeout {
                    url: logged.clone(),
                }
            } else {
                FetchError::Http(Box::new(e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: logged.clone(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e.without_url())))?;

        debug!(
            url = %logged,
            final_url = %redact_url(&final_url),
            content_length = body.len(),
            "HTTP fetch completed"
        );

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            content_type,
            body,
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url_hides_api_key() {
        let url = "https://www.googleapis.com/youtube/v3/videos?id=abc&part=snippet&key=AIza-secret";
        let redacted = redact_url(url);
        assert!(!redacted.contains("AIza-secret"));
        assert!(redacted.contains("key=REDACTED"));
        assert!(redacted.contains("id=abc"));
    }

    #[test]
    fn test_redact_url_leaves_plain_urls() {
        assert_eq!(redact_url("https://www.bbc.co.uk/news/1"), "https://www.bbc.co.uk/news/1");
        assert_eq!(redact_url("not a url"), "not a url");
    }
}
