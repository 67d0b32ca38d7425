use crate::common::ApiError;
use crate::domains::auth::JwtService;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated caller from a verified JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
    pub is_admin: bool,
}

/// JWT authentication middleware
///
/// Verifies the Authorization header and adds AuthUser to request extensions.
/// Requests without a valid token continue unauthenticated.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!(subject = %user.subject, is_admin = user.is_admin, "Authenticated request");
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Rejects requests without an admin AuthUser.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin => next.run(request).await,
        _ => {
            debug!(path = %request.uri().path(), "Admin route without valid token");
            ApiError::Unauthorized("Unauthorized".to_string()).into_response()
        }
    }
}

fn extract_auth_user(request: &Request, jwt_service: &JwtService) -> Option<AuthUser> {
    let auth_str = request.headers().get("authorization")?.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        subject: claims.sub,
        is_admin: claims.is_admin,
    })
}
