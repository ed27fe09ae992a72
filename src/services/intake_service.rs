//! Booking and inquiry intake
//!
//! A submission goes through three gates before anything is written:
//! presence of the required fields, format validation of every field, and
//! resolution of the referenced vehicle. Only then is the row stored and the
//! operator notification dispatched.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::booking_dto::{BookingForm, BookingSubmission, InquiryForm, InquirySubmission};
use crate::models::booking::{BookingRequest, BookingStatus, RentalType};
use crate::models::inquiry::InquiryRequest;
use crate::models::vehicle::Vehicle;
use crate::repositories::{BookingStore, InquiryStore, VehicleStore};
use crate::services::clock::Clock;
use crate::services::notification_service::{dispatch, Notification, Notifier};
use crate::utils::errors::{field_error, AppError, AppResult};
use crate::utils::validation::{
    non_blank, validate_date, validate_date_order, validate_not_past, validate_uuid,
};

pub const BOOKING_FAILED: &str = "Failed to process booking request";
pub const INQUIRY_FAILED: &str = "Failed to process inquiry";

pub struct IntakeService {
    vehicles: Arc<dyn VehicleStore>,
    bookings: Arc<dyn BookingStore>,
    inquiries: Arc<dyn InquiryStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl IntakeService {
    pub fn new(
        vehicles: Arc<dyn VehicleStore>,
        bookings: Arc<dyn BookingStore>,
        inquiries: Arc<dyn InquiryStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vehicles,
            bookings,
            inquiries,
            notifier,
            clock,
        }
    }

    /// Validate, store and announce a booking request
    pub async fn submit_booking(&self, submission: BookingSubmission) -> AppResult<BookingRequest> {
        let mut missing = Vec::new();
        let name = take_required(submission.name, "name", &mut missing);
        let phone = take_required(submission.phone, "phone", &mut missing);
        let email = take_required(submission.email, "email", &mut missing);
        let pickup_raw = take_required(submission.pickup_date, "pickup_date", &mut missing);
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let form = BookingForm {
            name,
            phone,
            email,
            pickup_location: non_blank(submission.pickup_location),
            message: non_blank(submission.message),
        };
        let mut errors = form.validate().err().unwrap_or_else(ValidationErrors::new);

        let today = self.clock.today();
        let pickup_date = parse_date(&pickup_raw, "pickup_date", &mut errors);
        if let Some(date) = pickup_date {
            if let Err(e) = validate_not_past(date, today) {
                errors.add("pickup_date", e);
            }
        }
        let return_date = non_blank(submission.return_date)
            .and_then(|raw| parse_date(&raw, "return_date", &mut errors));
        if let (Some(start), Some(end)) = (pickup_date, return_date) {
            if let Err(e) = validate_date_order(start, end) {
                errors.add("return_date", e);
            }
        }

        let rental_type = parse_rental_type(submission.rental_type, &mut errors);
        let vehicle = self
            .resolve_vehicle(submission.vehicle_id, &mut errors, BOOKING_FAILED)
            .await?;

        let pickup_date = match pickup_date {
            Some(date) if errors.errors().is_empty() => date,
            _ => return Err(AppError::Validation(errors)),
        };

        let booking = BookingRequest {
            id: Uuid::new_v4(),
            name: form.name,
            phone: form.phone,
            email: form.email,
            vehicle_id: vehicle.as_ref().map(|v| v.id),
            vehicle_name: vehicle.map(|v| v.name),
            rental_type,
            pickup_date,
            return_date,
            pickup_location: form.pickup_location,
            message: form.message,
            status: BookingStatus::New,
            created_at: self.clock.now(),
        };

        let stored = self.bookings.insert(booking).await.map_err(|e| {
            error!("❌ Error storing booking request: {}", e);
            AppError::SubmissionFailed(BOOKING_FAILED)
        })?;

        info!("📝 Booking {} received from {}", stored.id, stored.name);
        dispatch(self.notifier.clone(), Notification::NewBooking(stored.clone()));

        Ok(stored)
    }

    /// Validate, store and announce a contact inquiry
    pub async fn submit_inquiry(&self, submission: InquirySubmission) -> AppResult<InquiryRequest> {
        let mut missing = Vec::new();
        let name = take_required(submission.name, "name", &mut missing);
        let phone = take_required(submission.phone, "phone", &mut missing);
        let email = take_required(submission.email, "email", &mut missing);
        let message = take_required(submission.message, "message", &mut missing);
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let form = InquiryForm {
            name,
            phone,
            email,
            message,
        };
        let mut errors = form.validate().err().unwrap_or_else(ValidationErrors::new);

        let start_date = non_blank(submission.start_date)
            .and_then(|raw| parse_date(&raw, "start_date", &mut errors));
        let end_date = non_blank(submission.end_date)
            .and_then(|raw| parse_date(&raw, "end_date", &mut errors));
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if let Err(e) = validate_date_order(start, end) {
                errors.add("end_date", e);
            }
        }

        let rental_type = parse_rental_type(submission.rental_type, &mut errors);
        let vehicle = self
            .resolve_vehicle(submission.vehicle_id, &mut errors, INQUIRY_FAILED)
            .await?;

        if !errors.errors().is_empty() {
            return Err(AppError::Validation(errors));
        }

        let inquiry = InquiryRequest {
            id: Uuid::new_v4(),
            name: form.name,
            phone: form.phone,
            email: form.email,
            vehicle_id: vehicle.as_ref().map(|v| v.id),
            vehicle_name: vehicle.map(|v| v.name),
            rental_type,
            start_date,
            end_date,
            message: form.message,
            created_at: self.clock.now(),
        };

        let stored = self.inquiries.insert(inquiry).await.map_err(|e| {
            error!("❌ Error storing inquiry: {}", e);
            AppError::SubmissionFailed(INQUIRY_FAILED)
        })?;

        info!("📝 Inquiry {} received from {}", stored.id, stored.name);
        dispatch(self.notifier.clone(), Notification::NewInquiry(stored.clone()));

        Ok(stored)
    }

    /// Look up the referenced vehicle so its name can be stored with the row
    async fn resolve_vehicle(
        &self,
        raw: Option<String>,
        errors: &mut ValidationErrors,
        failure: &'static str,
    ) -> AppResult<Option<Vehicle>> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        let id = match validate_uuid(&raw) {
            Ok(id) => id,
            Err(e) => {
                errors.add("vehicle_id", e);
                return Ok(None);
            }
        };

        let vehicle = self.vehicles.find_by_id(id).await.map_err(|e| {
            error!("❌ Error resolving vehicle {}: {}", id, e);
            AppError::SubmissionFailed(failure)
        })?;

        if vehicle.is_none() {
            errors.add(
                "vehicle_id",
                field_error("unknown_vehicle", "must reference an existing vehicle"),
            );
        }
        Ok(vehicle)
    }
}

fn take_required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    non_blank(value).unwrap_or_else(|| {
        missing.push(field);
        String::new()
    })
}

fn parse_date(raw: &str, field: &'static str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    validate_date(raw).map_err(|e| errors.add(field, e)).ok()
}

fn parse_rental_type(raw: Option<String>, errors: &mut ValidationErrors) -> Option<RentalType> {
    let raw = non_blank(raw)?;
    match raw.parse::<RentalType>() {
        Ok(rental_type) => Some(rental_type),
        Err(_) => {
            errors.add(
                "rental_type",
                field_error(
                    "rental_type",
                    "must be one of daily, weekly, monthly, corporate, airport",
                ),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::repositories::{CatalogSnapshot, MemoryStore};
    use crate::services::clock::FixedClock;
    use crate::services::notification_service::NotificationError;

    const AXIO_ID: &str = "3f6c1f0e-6a3b-4c39-9d0a-0f5a1e2b7c01";

    struct CountingNotifier {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn notify(&self, _notification: &Notification) -> Result<(), NotificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NotificationError::Rejected(reqwest::StatusCode::BAD_GATEWAY));
            }
            Ok(())
        }
    }

    struct BrokenBookings;

    #[async_trait]
    impl BookingStore for BrokenBookings {
        async fn insert(&self, _booking: BookingRequest) -> AppResult<BookingRequest> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<BookingRequest>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn list_recent(
            &self,
            _status: Option<BookingStatus>,
            _limit: i64,
        ) -> AppResult<Vec<BookingRequest>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn update_status(
            &self,
            _id: Uuid,
            _from: BookingStatus,
            _to: BookingStatus,
        ) -> AppResult<Option<BookingRequest>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn delete(&self, _id: Uuid) -> AppResult<bool> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn count_by_status(&self) -> AppResult<Vec<(BookingStatus, i64)>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        notifier: Arc<CountingNotifier>,
        service: IntakeService,
    }

    fn fixture(fail_notifications: bool) -> Fixture {
        let store = Arc::new(MemoryStore::from_snapshot(CatalogSnapshot::bundled().unwrap()));
        let notifier = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: fail_notifications,
        });
        let service = IntakeService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            notifier.clone(),
            Arc::new(FixedClock::on(2026, 1, 1)),
        );
        Fixture {
            store,
            notifier,
            service,
        }
    }

    fn ahmed() -> BookingSubmission {
        BookingSubmission {
            name: Some("Ahmed Rahman".to_string()),
            phone: Some("+880171234567".to_string()),
            email: Some("ahmed@example.com".to_string()),
            pickup_date: Some("2026-01-05".to_string()),
            ..Default::default()
        }
    }

    async fn stored_bookings(store: &MemoryStore) -> Vec<BookingRequest> {
        BookingStore::list_recent(store, None, 100).await.unwrap()
    }

    async fn wait_for_calls(notifier: &CountingNotifier, expected: usize) {
        for _ in 0..50 {
            if notifier.calls.load(Ordering::SeqCst) == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} notification(s)", expected);
    }

    #[tokio::test]
    async fn test_booking_is_stored_as_new() {
        let f = fixture(false);
        let booking = f.service.submit_booking(ahmed()).await.unwrap();

        assert_eq!(booking.status, BookingStatus::New);
        assert_eq!(booking.vehicle_name, None);
        assert_eq!(booking.pickup_date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(stored_bookings(&f.store).await, vec![booking]);
        wait_for_calls(&f.notifier, 1).await;
    }

    #[tokio::test]
    async fn test_missing_email_writes_nothing() {
        let f = fixture(false);
        let mut submission = ahmed();
        submission.email = Some("   ".to_string());

        match f.service.submit_booking(submission).await {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["email"]),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(stored_bookings(&f.store).await.is_empty());
    }

    #[tokio::test]
    async fn test_field_errors_are_collected() {
        let f = fixture(false);
        let submission = BookingSubmission {
            phone: Some("123".to_string()),
            email: Some("nope".to_string()),
            pickup_date: Some("2025-12-31".to_string()),
            return_date: Some("2025-12-01".to_string()),
            rental_type: Some("hourly".to_string()),
            ..ahmed()
        };

        let Err(AppError::Validation(errors)) = f.service.submit_booking(submission).await else {
            panic!("expected a validation error");
        };
        let fields = errors.field_errors();
        for field in ["phone", "email", "pickup_date", "return_date", "rental_type"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
        assert!(stored_bookings(&f.store).await.is_empty());
    }

    #[tokio::test]
    async fn test_pickup_today_is_accepted() {
        let f = fixture(false);
        let submission = BookingSubmission {
            pickup_date: Some("2026-01-01".to_string()),
            ..ahmed()
        };
        assert!(f.service.submit_booking(submission).await.is_ok());
    }

    #[tokio::test]
    async fn test_past_is_judged_in_business_time() {
        use crate::services::clock::offset_from_minutes;
        use crate::services::notification_service::LogNotifier;
        use chrono::{TimeZone, Utc};

        let store = Arc::new(MemoryStore::from_snapshot(CatalogSnapshot::bundled().unwrap()));
        // 20:30 UTC on Jan 1 is already Jan 2 in Dhaka
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 1, 1, 20, 30, 0).unwrap())
            .in_offset(offset_from_minutes(360).unwrap());
        let service = IntakeService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(LogNotifier),
            Arc::new(clock),
        );

        let yesterday = BookingSubmission {
            pickup_date: Some("2026-01-01".to_string()),
            ..ahmed()
        };
        let Err(AppError::Validation(errors)) = service.submit_booking(yesterday).await else {
            panic!("expected a validation error");
        };
        assert!(errors.field_errors().contains_key("pickup_date"));

        let today = BookingSubmission {
            pickup_date: Some("2026-01-02".to_string()),
            ..ahmed()
        };
        assert!(service.submit_booking(today).await.is_ok());
    }

    #[tokio::test]
    async fn test_vehicle_name_is_resolved_from_catalog() {
        let f = fixture(false);
        let submission = BookingSubmission {
            vehicle_id: Some(AXIO_ID.to_string()),
            vehicle_name: Some("Something else".to_string()),
            rental_type: Some("Weekly".to_string()),
            ..ahmed()
        };

        let booking = f.service.submit_booking(submission).await.unwrap();
        assert_eq!(booking.vehicle_name.as_deref(), Some("Toyota Axio"));
        assert_eq!(booking.rental_type, Some(RentalType::Weekly));
    }

    #[tokio::test]
    async fn test_unknown_vehicle_is_rejected() {
        let f = fixture(false);
        let submission = BookingSubmission {
            vehicle_id: Some(Uuid::new_v4().to_string()),
            ..ahmed()
        };

        let Err(AppError::Validation(errors)) = f.service.submit_booking(submission).await else {
            panic!("expected a validation error");
        };
        assert!(errors.field_errors().contains_key("vehicle_id"));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_booking() {
        let f = fixture(true);
        assert!(f.service.submit_booking(ahmed()).await.is_ok());
        wait_for_calls(&f.notifier, 1).await;
        assert_eq!(stored_bookings(&f.store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_identical_submissions_create_distinct_rows() {
        let f = fixture(false);
        let first = f.service.submit_booking(ahmed()).await.unwrap();
        let second = f.service.submit_booking(ahmed()).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(stored_bookings(&f.store).await.len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_submission_failed() {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let service = IntakeService::new(
            store.clone(),
            Arc::new(BrokenBookings),
            store,
            notifier.clone(),
            Arc::new(FixedClock::on(2026, 1, 1)),
        );

        match service.submit_booking(ahmed()).await {
            Err(AppError::SubmissionFailed(msg)) => assert_eq!(msg, BOOKING_FAILED),
            other => panic!("unexpected result: {:?}", other),
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_inquiry_requires_message() {
        let f = fixture(false);
        let submission = InquirySubmission {
            name: Some("Nadia Islam".to_string()),
            phone: Some("01712345678".to_string()),
            email: Some("nadia@example.com".to_string()),
            ..Default::default()
        };

        match f.service.submit_inquiry(submission).await {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["message"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inquiry_is_stored() {
        let f = fixture(false);
        let submission = InquirySubmission {
            name: Some("Nadia Islam".to_string()),
            phone: Some("01712345678".to_string()),
            email: Some("nadia@example.com".to_string()),
            start_date: Some("2026-02-01".to_string()),
            end_date: Some("2026-02-03".to_string()),
            message: Some("Do you have a microbus for a wedding?".to_string()),
            ..Default::default()
        };

        let inquiry = f.service.submit_inquiry(submission).await.unwrap();
        assert_eq!(inquiry.end_date, NaiveDate::from_ymd_opt(2026, 2, 3));
        assert_eq!(InquiryStore::count(f.store.as_ref()).await.unwrap(), 1);
        wait_for_calls(&f.notifier, 1).await;
    }
}
