//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use ingestion::Pipeline;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::common::ApiError;
use crate::domains::articles::{self, ArticleStore};
use crate::domains::auth::{self, AdminPassword, JwtService};
use crate::domains::citations;
use crate::domains::dashboard;
use crate::domains::inbox::{self, InboxStore};
use crate::domains::ingest::{self, IngestionLogStore};
use crate::domains::videos::{self, VideoStore};
use crate::server::middleware::{extract_client_ip, jwt_auth_middleware, require_admin};
use crate::server::routes::health_handler;

/// Login attempts allowed per client before throttling.
const LOGIN_BURST: u32 = 5;
/// Seconds until one more attempt is allowed.
const LOGIN_REPLENISH_SECS: u64 = 12;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<ArticleStore>,
    pub videos: Arc<VideoStore>,
    pub ingestion_logs: Arc<IngestionLogStore>,
    pub inbox: Arc<InboxStore>,
    pub pipeline: Arc<Pipeline>,
    pub jwt_service: Arc<JwtService>,
    pub admin_password: AdminPassword,
}

impl AppState {
    /// Fresh state with empty stores.
    pub fn new(pipeline: Pipeline, jwt_service: JwtService, admin_password: AdminPassword) -> Self {
        Self {
            articles: Arc::new(ArticleStore::new()),
            videos: Arc::new(VideoStore::new()),
            ingestion_logs: Arc::new(IngestionLogStore::new()),
            inbox: Arc::new(InboxStore::new()),
            pipeline: Arc::new(pipeline),
            jwt_service: Arc::new(jwt_service),
            admin_password,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

fn admin_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/articles",
            get(articles::edges::admin_list_handler).post(articles::edges::create_handler),
        )
        .route(
            "/api/admin/articles/:id",
            get(articles::edges::admin_get_handler)
                .put(articles::edges::update_handler)
                .delete(articles::edges::delete_handler),
        )
        .route(
            "/api/admin/videos",
            get(videos::edges::admin_list_handler).post(videos::edges::create_handler),
        )
        .route(
            "/api/admin/videos/:id",
            put(videos::edges::update_handler).delete(videos::edges::delete_handler),
        )
        .route("/api/admin/ingest", post(ingest::edges::ingest_handler))
        .route("/api/admin/ingest/logs", get(ingest::edges::logs_handler))
        .route("/api/admin/stats", get(dashboard::edges::stats_handler))
        .route("/api/admin/inbox", get(inbox::edges::admin_inbox_handler))
        .route("/api/admin/citations", post(citations::edges::analyze_handler))
        .route_layer(middleware::from_fn(require_admin))
}

/// Rate limit headers carried over onto the JSON body.
const RATE_LIMIT_HEADERS: [&str; 2] = ["x-ratelimit-after", "x-ratelimit-limit"];

/// Replace the limiter's plain-text 429 with the usual `{"error": ...}` body.
async fn rate_limited_as_json(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let mut json =
        ApiError::TooManyRequests("Too many login attempts, try again later".to_string()).into_response();
    let headers = response.headers();
    if let Some(value) = headers.get(RETRY_AFTER) {
        json.headers_mut().insert(RETRY_AFTER, value.clone());
    }
    for name in RATE_LIMIT_HEADERS {
        if let Some(value) = headers.get(name) {
            json.headers_mut().insert(name, value.clone());
        }
    }
    json
}

/// Build the Axum application router
///
/// `rate_limit_enabled` throttles `/api/auth/login` per client IP. The limiter
/// keys on the peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` or every login
/// answers 500.
pub fn build_app(state: AppState, allowed_origins: Vec<String>, rate_limit_enabled: bool) -> Router {
    let mut login = post(auth::edges::login_handler);
    if rate_limit_enabled {
        match GovernorConfigBuilder::default()
            .per_second(LOGIN_REPLENISH_SECS)
            .burst_size(LOGIN_BURST)
            .use_headers()
            .finish()
        {
            Some(config) => {
                login = login
                    .layer(GovernorLayer {
                        config: Arc::new(config),
                    })
                    .layer(middleware::map_response(rate_limited_as_json));
                info!(burst = LOGIN_BURST, replenish_secs = LOGIN_REPLENISH_SECS, "Login rate limit enabled");
            }
            None => warn!("Invalid login rate limit configuration, continuing without it"),
        }
    }

    let jwt_service = state.jwt_service.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/articles", get(articles::edges::list_published_handler))
        .route("/api/articles/:slug", get(articles::edges::get_by_slug_handler))
        .route("/api/articles/:slug/related", get(articles::edges::related_handler))
        .route("/api/videos", get(videos::edges::list_published_handler))
        .route("/api/contact", post(inbox::edges::contact_handler))
        .route("/api/newsletter", post(inbox::edges::newsletter_handler))
        .route("/api/auth/login", login)
        .merge(admin_routes())
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(middleware::from_fn(extract_client_ip))
        .layer(Extension(state))
        .layer(cors_layer(&allowed_origins))
        .layer(TraceLayer::new_for_http())
}
