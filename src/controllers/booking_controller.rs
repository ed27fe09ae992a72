//! Booking lifecycle
//!
//! Status changes go through `transition`, which is the only writer of
//! `status` after intake. The write is conditional on the status that was
//! read, so a concurrent change is re-checked against the edge rules instead
//! of being overwritten.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::booking::{BookingRequest, BookingStatus};
use crate::models::inquiry::InquiryRequest;
use crate::repositories::{BookingStore, InquiryStore};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Read-check-write rounds before giving up on a booking that keeps changing
const TRANSITION_ATTEMPTS: usize = 3;

pub struct BookingController {
    bookings: Arc<dyn BookingStore>,
    inquiries: Arc<dyn InquiryStore>,
    list_limit: i64,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: state.bookings.clone(),
            inquiries: state.inquiries.clone(),
            list_limit: state.config.booking_list_limit,
        }
    }

    /// Newest first. A store failure yields an empty list instead of an
    /// error, and so does an unknown status filter.
    pub async fn list(&self, status: Option<&str>, limit: Option<i64>) -> Vec<BookingRequest> {
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<BookingStatus>() {
                Ok(status) => Some(status),
                Err(_) => return Vec::new(),
            },
        };

        match self.bookings.list_recent(status, self.bounded(limit)).await {
            Ok(bookings) => bookings,
            Err(e) => {
                error!("❌ Error listing bookings: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BookingRequest> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))
    }

    /// Move a booking along the lifecycle. Asking for the current status
    /// succeeds without a write.
    pub async fn transition(&self, id: Uuid, next: BookingStatus) -> AppResult<BookingRequest> {
        for _ in 0..TRANSITION_ATTEMPTS {
            let booking = self.get(id).await?;
            let current = booking.status;

            if current == next {
                return Ok(booking);
            }
            if !current.can_transition_to(next) {
                return Err(AppError::InvalidTransition {
                    from: current,
                    to: next,
                });
            }

            if let Some(updated) = self.bookings.update_status(id, current, next).await? {
                info!("🔄 Booking {} moved {} -> {}", id, current, next);
                return Ok(updated);
            }
            warn!("⚠️ Booking {} changed while moving to {}, re-checking", id, next);
        }

        Err(AppError::Conflict(format!(
            "Booking '{}' is being changed by someone else, try again",
            id
        )))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.bookings.delete(id).await? {
            return Err(not_found_error("Booking", &id.to_string()));
        }
        info!("🗑️ Booking deleted: {}", id);
        Ok(())
    }

    pub async fn list_inquiries(&self, limit: Option<i64>) -> AppResult<Vec<InquiryRequest>> {
        self.inquiries.list_recent(self.bounded(limit)).await
    }

    fn bounded(&self, limit: Option<i64>) -> i64 {
        limit.unwrap_or(self.list_limit).clamp(1, self.list_limit.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::config::EnvironmentConfig;
    use crate::repositories::MemoryStore;

    fn booking(status: BookingStatus) -> BookingRequest {
        BookingRequest {
            id: Uuid::new_v4(),
            name: "Ahmed Rahman".to_string(),
            phone: "+880171234567".to_string(),
            email: "ahmed@example.com".to_string(),
            vehicle_id: None,
            vehicle_name: None,
            rental_type: None,
            pickup_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            return_date: None,
            pickup_location: None,
            message: None,
            status,
            created_at: Utc::now(),
        }
    }

    async fn seeded(status: BookingStatus) -> (BookingController, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let row = BookingStore::insert(store.as_ref(), booking(status)).await.unwrap();
        let state = AppState::in_memory(store, EnvironmentConfig::development(String::new()));
        (BookingController::new(&state), row.id)
    }

    #[tokio::test]
    async fn test_new_to_confirmed_then_read() {
        let (controller, id) = seeded(BookingStatus::New).await;
        controller.transition(id, BookingStatus::Confirmed).await.unwrap();
        assert_eq!(controller.get(id).await.unwrap().status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_completed_cannot_go_back() {
        let (controller, id) = seeded(BookingStatus::Completed).await;
        match controller.transition(id, BookingStatus::Contacted).await {
            Err(AppError::InvalidTransition { from, to }) => {
                assert_eq!(from, BookingStatus::Completed);
                assert_eq!(to, BookingStatus::Contacted);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(controller.get(id).await.unwrap().status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn test_same_status_is_noop() {
        let (controller, id) = seeded(BookingStatus::Cancelled).await;
        let booking = controller.transition(id, BookingStatus::Cancelled).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_unknown_booking_is_not_found() {
        let (controller, _) = seeded(BookingStatus::New).await;
        assert!(matches!(
            controller.transition(Uuid::new_v4(), BookingStatus::Contacted).await,
            Err(AppError::NotFound(_))
        ));
    }

    /// Lets another admin's status change land just before ours
    struct CompetingAdmin {
        inner: Arc<MemoryStore>,
        competing: BookingStatus,
        raced: AtomicBool,
    }

    #[async_trait]
    impl BookingStore for CompetingAdmin {
        async fn insert(&self, booking: BookingRequest) -> AppResult<BookingRequest> {
            BookingStore::insert(self.inner.as_ref(), booking).await
        }
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookingRequest>> {
            BookingStore::find_by_id(self.inner.as_ref(), id).await
        }
        async fn list_recent(
            &self,
            status: Option<BookingStatus>,
            limit: i64,
        ) -> AppResult<Vec<BookingRequest>> {
            BookingStore::list_recent(self.inner.as_ref(), status, limit).await
        }
        async fn update_status(
            &self,
            id: Uuid,
            from: BookingStatus,
            to: BookingStatus,
        ) -> AppResult<Option<BookingRequest>> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                self.inner.update_status(id, from, self.competing).await?;
            }
            self.inner.update_status(id, from, to).await
        }
        async fn delete(&self, id: Uuid) -> AppResult<bool> {
            BookingStore::delete(self.inner.as_ref(), id).await
        }
        async fn count_by_status(&self) -> AppResult<Vec<(BookingStatus, i64)>> {
            self.inner.count_by_status().await
        }
    }

    async fn contested(
        status: BookingStatus,
        competing: BookingStatus,
    ) -> (BookingController, Arc<MemoryStore>, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let row = BookingStore::insert(store.as_ref(), booking(status)).await.unwrap();
        let state = AppState::in_memory(store.clone(), EnvironmentConfig::development(String::new()))
            .with_bookings(Arc::new(CompetingAdmin {
                inner: store.clone(),
                competing,
                raced: AtomicBool::new(false),
            }));
        (BookingController::new(&state), store, row.id)
    }

    #[tokio::test]
    async fn test_concurrent_cancel_is_not_overwritten() {
        let (controller, store, id) =
            contested(BookingStatus::Confirmed, BookingStatus::Cancelled).await;

        match controller.transition(id, BookingStatus::Completed).await {
            Err(AppError::InvalidTransition { from, to }) => {
                assert_eq!(from, BookingStatus::Cancelled);
                assert_eq!(to, BookingStatus::Completed);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        let stored = BookingStore::find_by_id(store.as_ref(), id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_concurrent_legal_change_is_rechecked() {
        let (controller, _, id) = contested(BookingStatus::New, BookingStatus::Contacted).await;

        let booking = controller.transition(id, BookingStatus::Confirmed).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_list_filters_and_reads_are_repeatable() {
        let (controller, id) = seeded(BookingStatus::New).await;
        assert_eq!(controller.list(Some("new"), None).await.len(), 1);
        assert!(controller.list(Some("confirmed"), None).await.is_empty());
        assert!(controller.list(Some("archived"), None).await.is_empty());
        assert_eq!(controller.get(id).await.unwrap(), controller.get(id).await.unwrap());
    }
}
