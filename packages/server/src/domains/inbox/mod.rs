//! Inbox domain - contact form messages and newsletter signups

pub mod edges;
pub mod models;
pub mod store;

pub use models::{ContactMessage, InquiryType, NewsletterSubscriber};
pub use store::InboxStore;
