//! HTTP handlers for the auth domain

use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::{ApiError, ApiResult};
use crate::server::app::AppState;
use crate::server::middleware::ClientIp;

/// Subject written into admin tokens.
pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Exchange the admin password for a bearer token.
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let ip = client_ip.map(|Extension(ClientIp(ip))| ip.to_string());
    let password = request.password.unwrap_or_default();
    if !state.admin_password.verify(&password) {
        warn!(client_ip = ?ip, "Admin login rejected");
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    let issued = state.jwt_service.create_token(ADMIN_SUBJECT, true)?;
    info!(client_ip = ?ip, expires_at = %issued.expires_at, "Admin token issued");

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
