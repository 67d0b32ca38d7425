use anyhow::{Context, Result};
use dotenvy::dotenv;
use ingestion::SecretString;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub admin_password: SecretString,
    pub jwt_secret: SecretString,
    pub jwt_issuer: String,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub youtube_api_key: Option<SecretString>,
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub rate_limit_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_password: non_empty("ADMIN_PASSWORD")
                .context("ADMIN_PASSWORD must be set")?
                .into(),
            jwt_secret: non_empty("JWT_SECRET")
                .context("JWT_SECRET must be set")?
                .into(),
            jwt_issuer: non_empty("JWT_ISSUER").unwrap_or_else(|| "portfolio".to_string()),
            allowed_origins: non_empty("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            youtube_api_key: non_empty("YOUTUBE_API_KEY").map(SecretString::from),
            openai_api_key: non_empty("OPENAI_API_KEY").map(SecretString::from),
            openai_model: non_empty("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            rate_limit_enabled: match non_empty("RATE_LIMIT_ENABLED") {
                Some(value) => parse_bool(&value).context("RATE_LIMIT_ENABLED must be true or false")?,
                None => true,
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
