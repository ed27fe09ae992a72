//! Store seams
//!
//! Every durable read and write goes through these traits. Two backends
//! implement them: the PostgreSQL repositories and the in-memory store that
//! serves the bundled static snapshot. Which one is active is decided once at
//! startup from configuration.

pub mod booking_repository;
pub mod inquiry_repository;
pub mod memory_store;
pub mod post_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::blog_post::BlogPost;
use crate::models::booking::{BookingRequest, BookingStatus};
use crate::models::inquiry::InquiryRequest;
use crate::models::vehicle::{Vehicle, VehicleCategory};
use crate::utils::errors::AppResult;

pub use booking_repository::BookingRepository;
pub use inquiry_repository::InquiryRepository;
pub use memory_store::{CatalogSnapshot, MemoryStore};
pub use post_repository::PostRepository;
pub use vehicle_repository::VehicleRepository;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Active vehicles ordered by name, optionally restricted to a category
    async fn list_active(&self, category: Option<VehicleCategory>) -> AppResult<Vec<Vehicle>>;
    /// Every vehicle, newest first
    async fn list_all(&self) -> AppResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Vehicle>>;
    async fn slug_exists(&self, slug: &str) -> AppResult<bool>;
    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle>;
    /// Replace the stored row with the same id; `None` when it is gone
    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Published posts, newest first
    async fn list_published(&self, limit: Option<i64>) -> AppResult<Vec<BlogPost>>;
    /// Every post including drafts, newest first
    async fn list_all(&self) -> AppResult<Vec<BlogPost>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>>;
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>>;
    async fn slug_exists(&self, slug: &str) -> AppResult<bool>;
    async fn insert(&self, post: BlogPost) -> AppResult<BlogPost>;
    async fn update(&self, post: BlogPost) -> AppResult<Option<BlogPost>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: BookingRequest) -> AppResult<BookingRequest>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookingRequest>>;
    /// Most recent bookings first
    async fn list_recent(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
    ) -> AppResult<Vec<BookingRequest>>;
    /// Write `to` only while the stored status is still `from`. `None` when
    /// the booking is gone or has moved on.
    async fn update_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<BookingRequest>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn count_by_status(&self) -> AppResult<Vec<(BookingStatus, i64)>>;
}

#[async_trait]
pub trait InquiryStore: Send + Sync {
    async fn insert(&self, inquiry: InquiryRequest) -> AppResult<InquiryRequest>;
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<InquiryRequest>>;
    async fn count(&self) -> AppResult<i64>;
}
