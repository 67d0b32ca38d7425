//! URL validation for SSRF protection.

use async_trait::async_trait;
use std::collections::HashSet;
use std::net::IpAddr;
use tracing::warn;

use super::{FetchedPage, Fetcher, HttpFetcher};
use crate::error::{FetchError, FetchResult, SecurityError, SecurityResult};

/// URL validator for SSRF protection.
///
/// Validates URLs before fetching to prevent:
/// - Access to internal services (localhost, 127.0.0.1)
/// - Access to private IP ranges (10.x, 172.16.x, 192.168.x)
/// - Access to cloud metadata services (169.254.x)
/// - Non-HTTP(S) schemes (file://, ftp://)
#[derive(Debug, Clone)]
pub struct UrlValidator {
    allowed_schemes: HashSet<String>,
    blocked_hosts: HashSet<String>,
    blocked_cidrs: Vec<ipnet::IpNet>,
    /// Bypass normal validation
    allowed_hosts: HashSet<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// Create a new URL validator with default security rules.
    pub fn new() -> Self {
        let blocked_cidrs = [
            "10.0.0.0/8",
            "172.16.0.0/12",
            "192.168.0.0/16",
            "169.254.0.0/16", // Link-local / cloud metadata
            "127.0.0.0/8",
            "0.0.0.0/8",
            "::1/128",
            "fc00::/7",
            "fe80::/10",
        ]
        .into_iter()
        .filter_map(|cidr| cidr.parse().ok())
        .collect();

        Self {
            allowed_schemes: ["http", "https"].into_iter().map(String::from).collect(),
            blocked_hosts: [
                "localhost",
                "127.0.0.1",
                "::1",
                "[::1]",
                "0.0.0.0",
                "metadata.google.internal",
                "metadata.gke.internal",
                "instance-data",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            blocked_cidrs,
            allowed_hosts: HashSet::new(),
        }
    }

    /// Add an allowed host (bypasses validation).
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.insert(host.into());
        self
    }

    /// Validate a URL for safety without touching DNS.
    pub fn validate(&self, url: &str) -> SecurityResult<()> {
        let parsed = url::Url::parse(url)?;

        if !self.allowed_schemes.contains(parsed.scheme()) {
            return Err(SecurityError::DisallowedScheme(parsed.scheme().to_string()));
        }

        let host = parsed.host_str().ok_or(SecurityError::NoHost)?;

        if self.allowed_hosts.contains(host) {
            return Ok(());
        }

        if self.blocked_hosts.contains(&host.to_lowercase()) {
            return Err(SecurityError::BlockedHost(host.to_string()));
        }

        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = bare.parse::<IpAddr>() {
            self.check_ip(ip)?;
        }

        Ok(())
    }

    /// Validate a URL and resolve DNS to check the actual IP.
    ///
    /// Catches hostnames that resolve to internal addresses.
    pub async fn validate_with_dns(&self, url: &str) -> SecurityResult<()> {
        self.validate(url)?;

        let parsed = url::Url::parse(url)?;
        let host = parsed.host_str().ok_or(SecurityError::NoHost)?;

        if self.allowed_hosts.contains(host) {
            return Ok(());
        }

        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if bare.parse::<IpAddr>().is_ok() {
            return Ok(());
        }

        let port = parsed.port_or_known_default().unwrap_or(80);
        let addrs = tokio::net::lookup_host(format!("{}:{}", host, port))
            .await
            .map_err(|e| SecurityError::DnsResolution(e.to_string()))?;

        for addr in addrs {
            self.check_resolved(host, addr.ip())?;
        }

        Ok(())
    }

    /// Check an address `host` resolved to. Allowed hosts always pass.
    pub(crate) fn check_resolved(&self, host: &str, ip: IpAddr) -> SecurityResult<()> {
        if self.allowed_hosts.contains(host) {
            return Ok(());
        }
        self.check_ip(ip).map_err(|_| {
            SecurityError::BlockedCidr(format!("DNS for {} resolved to blocked IP {}", host, ip))
        })
    }

    fn check_ip(&self, ip: IpAddr) -> SecurityResult<()> {
        match self.blocked_cidrs.iter().find(|cidr| cidr.contains(&ip)) {
            Some(_) => Err(SecurityError::BlockedCidr(ip.to_string())),
            None => Ok(()),
        }
    }
}

/// A fetcher that validates URLs before fetching (SSRF protection).
///
/// This only sees the URL it is handed and the final URL. Intermediate
/// redirect hops are checked by the inner fetcher, so pair it with
/// `HttpFetcher::with_validator` (see [`ValidatedFetcher::http`]).
pub struct ValidatedFetcher<F: Fetcher> {
    inner: F,
    validator: UrlValidator,
}

impl<F: Fetcher> ValidatedFetcher<F> {
    /// Create a new validated fetcher with default security rules.
    pub fn new(fetcher: F) -> Self {
        Self {
            inner: fetcher,
            validator: UrlValidator::new(),
        }
    }

    /// Create with a custom validator.
    pub fn with_validator(fetcher: F, validator: UrlValidator) -> Self {
        Self {
            inner: fetcher,
            validator,
        }
    }
}

impl ValidatedFetcher<HttpFetcher> {
    /// HTTP fetcher whose redirect hops and DNS answers go through `validator`.
    pub fn http(validator: UrlValidator) -> FetchResult<Self> {
        let inner = HttpFetcher::with_validator(validator.clone())?;
        Ok(Self::with_validator(inner, validator))
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for ValidatedFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.validator
            .validate_with_dns(url)
            .await
            .map_err(FetchError::Security)?;

        let page = self.inner.fetch(url).await?;

        if page.final_url != page.url {
            if let Err(e) = self.validator.validate_with_dns(&page.final_url).await {
                warn!(url = %url, final_url = %page.final_url, error = %e, "Redirected to blocked URL");
                return Err(FetchError::Security(e));
            }
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
