//! HTTP handlers for the contact form, newsletter and admin inbox

use axum::{extract::Extension, Json};
use serde::Serialize;

use super::models::{ContactMessage, ContactRequest, NewsletterRequest, NewsletterSubscriber};
use crate::common::{ApiResult, SuccessResponse};
use crate::server::app::AppState;

pub async fn contact_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ContactRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    state.inbox.add_message(request).await?;
    Ok(Json(SuccessResponse::with_message(
        "Thank you for your message. I will get back to you soon.",
    )))
}

pub async fn newsletter_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<NewsletterRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let added = state.inbox.subscribe(request).await?;
    let message = if added {
        "Successfully subscribed to the newsletter"
    } else {
        "You are already subscribed"
    };
    Ok(Json(SuccessResponse::with_message(message)))
}

#[derive(Debug, Serialize)]
pub struct InboxResponse {
    pub messages: Vec<ContactMessage>,
    pub subscribers: Vec<NewsletterSubscriber>,
}

pub async fn admin_inbox_handler(Extension(state): Extension<AppState>) -> Json<InboxResponse> {
    Json(InboxResponse {
        messages: state.inbox.messages().await,
        subscribers: state.inbox.subscribers().await,
    })
}
