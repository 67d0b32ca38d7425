// Main entry point for the portfolio API server

use anyhow::{Context, Result};
use ingestion::{NoopEnhancer, OpenAiEnhancer, Pipeline, UrlValidator, ValidatedFetcher};
use server_core::{
    domains::auth::{AdminPassword, JwtService},
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,ingestion=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting portfolio content service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Fetch pages over HTTP with SSRF protection on every redirect hop
    let fetcher = ValidatedFetcher::http(UrlValidator::new()).context("Failed to create HTTP client")?;
    let builder = Pipeline::builder(fetcher).with_youtube_api_key(config.youtube_api_key.clone());
    let pipeline = match config.openai_api_key.clone() {
        Some(key) => builder.with_enhancer(OpenAiEnhancer::new(key).with_model(config.openai_model.clone())),
        None => builder.with_enhancer(NoopEnhancer),
    }
    .build();
    tracing::info!(
        enhancer = pipeline.enhancer_name(),
        youtube_api = config.youtube_api_key.is_some(),
        "Ingestion pipeline ready"
    );

    let state = AppState::new(
        pipeline,
        JwtService::new(config.jwt_secret.expose(), config.jwt_issuer.clone()),
        AdminPassword::new(&config.admin_password),
    );
    let app = build_app(state, config.allowed_origins.clone(), config.rate_limit_enabled);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    // The login rate limiter keys on the peer address from ConnectInfo
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
