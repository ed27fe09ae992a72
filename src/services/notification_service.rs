//! Operator notifications
//!
//! Notifications run after the submission is stored and never take part in
//! the request outcome. `dispatch` detaches the send onto its own task; a
//! failure is logged there and dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::booking::BookingRequest;
use crate::models::inquiry::InquiryRequest;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification endpoint answered {0}")]
    Rejected(reqwest::StatusCode),
}

/// Event sent to the operator
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Notification {
    NewBooking(BookingRequest),
    NewInquiry(InquiryRequest),
}

impl Notification {
    pub fn subject(&self) -> String {
        match self {
            Notification::NewBooking(booking) => format!(
                "New booking request from {} for {}",
                booking.name,
                booking.vehicle_name.as_deref().unwrap_or("any available vehicle")
            ),
            Notification::NewInquiry(inquiry) => {
                format!("New inquiry from {}", inquiry.name)
            }
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Posts the notification as JSON to a relay (mail service, chat webhook)
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            url: url.into(),
        }
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    subject: String,
    #[serde(flatten)]
    notification: &'a Notification,
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let payload = WebhookPayload {
            subject: notification.subject(),
            notification,
        };
        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(NotificationError::Rejected(response.status()));
        }
        Ok(())
    }
}

/// Used when no webhook is configured
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!("📨 {}", notification.subject());
        Ok(())
    }
}

/// Send on a detached task; the caller never waits for or sees the result
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) {
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(&notification).await {
            warn!("⚠️ Notification dropped ({}): {}", notification.subject(), e);
        }
    });
}
