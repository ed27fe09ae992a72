//! Shared application state
//!
//! Built once at startup and cloned into every handler. The stores are trait
//! objects so the same router runs over PostgreSQL or the in-memory snapshot.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::repositories::{
    BookingRepository, BookingStore, InquiryRepository, InquiryStore, MemoryStore, PostRepository,
    PostStore, VehicleRepository, VehicleStore,
};
use crate::services::clock::{Clock, SystemClock};
use crate::services::intake_service::IntakeService;
use crate::services::notification_service::{LogNotifier, Notifier, WebhookNotifier};
use crate::services::session_service::SessionService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub posts: Arc<dyn PostStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub inquiries: Arc<dyn InquiryStore>,
    pub notifier: Arc<dyn Notifier>,
    pub sessions: Arc<SessionService>,
    pub clock: Arc<dyn Clock>,
    pub rate_limit: RateLimitState,
}

impl AppState {
    /// Stores backed by PostgreSQL
    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::assemble(
            config,
            Arc::new(VehicleRepository::new(pool.clone())),
            Arc::new(PostRepository::new(pool.clone())),
            Arc::new(BookingRepository::new(pool.clone())),
            Arc::new(InquiryRepository::new(pool)),
        )
    }

    /// Every store served by one in-memory store
    pub fn in_memory(store: Arc<MemoryStore>, config: EnvironmentConfig) -> Self {
        Self::assemble(config, store.clone(), store.clone(), store.clone(), store)
    }

    fn assemble(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleStore>,
        posts: Arc<dyn PostStore>,
        bookings: Arc<dyn BookingStore>,
        inquiries: Arc<dyn InquiryStore>,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = match &config.notification_webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
            None => Arc::new(LogNotifier),
        };

        let clock = Arc::new(SystemClock::new(config.business_offset));

        Self {
            sessions: Arc::new(SessionService::new(&config)),
            rate_limit: RateLimitState::new(&config),
            config: Arc::new(config),
            vehicles,
            posts,
            bookings,
            inquiries,
            notifier,
            clock,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_bookings(mut self, bookings: Arc<dyn BookingStore>) -> Self {
        self.bookings = bookings;
        self
    }

    pub fn intake(&self) -> IntakeService {
        IntakeService::new(
            self.vehicles.clone(),
            self.bookings.clone(),
            self.inquiries.clone(),
            self.notifier.clone(),
            self.clock.clone(),
        )
    }
}
