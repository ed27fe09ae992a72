//! Services module
//!
//! Business logic that sits between the HTTP controllers and the stores.

pub mod clock;
pub mod intake_service;
pub mod notification_service;
pub mod presentation;
pub mod session_service;
pub mod sitemap;

pub use clock::{Clock, FixedClock, SystemClock};
pub use intake_service::IntakeService;
pub use notification_service::{LogNotifier, Notifier, WebhookNotifier};
pub use session_service::{SessionService, SESSION_COOKIE};
