use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::models::{ContactMessage, ContactRequest, NewsletterRequest, NewsletterSubscriber};
use crate::common::{ApiError, ApiResult};

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Contact messages and newsletter subscribers.
#[derive(Default)]
pub struct InboxStore {
    messages: RwLock<Vec<ContactMessage>>,
    subscribers: RwLock<Vec<NewsletterSubscriber>>,
}

impl InboxStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_message(&self, request: ContactRequest) -> ApiResult<ContactMessage> {
        let missing = || ApiError::BadRequest("Missing required fields".to_string());
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: required(request.name).ok_or_else(missing)?,
            email: required(request.email).ok_or_else(missing)?,
            organization: required(request.organization),
            message: required(request.message).ok_or_else(missing)?,
            inquiry_type: request.inquiry_type.ok_or_else(missing)?,
            received_at: Utc::now(),
        };

        info!(
            id = %message.id,
            inquiry_type = ?message.inquiry_type,
            organization = ?message.organization,
            "Contact message received"
        );
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    /// Returns `false` when the email was already subscribed.
    pub async fn subscribe(&self, request: NewsletterRequest) -> ApiResult<bool> {
        let email = required(request.email)
            .filter(|e| e.contains('@'))
            .ok_or_else(|| ApiError::BadRequest("Valid email is required".to_string()))?
            .to_lowercase();

        let mut subscribers = self.subscribers.write().await;
        if subscribers.iter().any(|s| s.email == email) {
            return Ok(false);
        }

        subscribers.push(NewsletterSubscriber {
            email,
            first_name: required(request.first_name),
            last_name: required(request.last_name),
            subscribed_at: Utc::now(),
        });
        info!(total = subscribers.len(), "Newsletter subscriber added");
        Ok(true)
    }

    /// Newest first.
    pub async fn messages(&self) -> Vec<ContactMessage> {
        let mut messages = self.messages.read().await.clone();
        messages.reverse();
        messages
    }

    pub async fn subscribers(&self) -> Vec<NewsletterSubscriber> {
        self.subscribers.read().await.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}
