//! In-memory store
//!
//! Backs the static snapshot data source: the catalog is seeded from a JSON
//! snapshot (bundled at build time or read from disk) and bookings and
//! inquiries live in process memory. Nothing written here survives a
//! restart, so it serves local development, previews and the test suite.

use std::cmp::Reverse;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookingStore, InquiryStore, PostStore, VehicleStore};
use crate::models::blog_post::BlogPost;
use crate::models::booking::{BookingRequest, BookingStatus};
use crate::models::inquiry::InquiryRequest;
use crate::models::vehicle::{Vehicle, VehicleCategory};
use crate::utils::errors::{AppError, AppResult};

const BUNDLED_SNAPSHOT: &str = include_str!("../../data/catalog.json");

/// Catalog content loaded into the in-memory store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub posts: Vec<BlogPost>,
}

impl CatalogSnapshot {
    /// Snapshot compiled into the binary
    pub fn bundled() -> AppResult<Self> {
        serde_json::from_str(BUNDLED_SNAPSHOT)
            .map_err(|e| AppError::Internal(format!("Bundled catalog snapshot is invalid: {}", e)))
    }

    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Cannot read catalog snapshot {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Internal(format!("Catalog snapshot {} is invalid: {}", path.display(), e))
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    vehicles: RwLock<Vec<Vehicle>>,
    posts: RwLock<Vec<BlogPost>>,
    bookings: RwLock<Vec<BookingRequest>>,
    inquiries: RwLock<Vec<InquiryRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            vehicles: RwLock::new(snapshot.vehicles),
            posts: RwLock::new(snapshot.posts),
            ..Self::default()
        }
    }
}

#[async_trait]
impl VehicleStore for MemoryStore {
    async fn list_active(&self, category: Option<VehicleCategory>) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut active: Vec<Vehicle> = vehicles
            .iter()
            .filter(|v| v.is_active)
            .filter(|v| category.map_or(true, |c| v.category == c))
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let mut all = self.vehicles.read().await.clone();
        all.sort_by_key(|v| Reverse(v.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.iter().find(|v| v.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        Ok(self.vehicles.read().await.iter().any(|v| v.slug == slug))
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.iter().any(|v| v.slug == vehicle.slug) {
            return Err(AppError::Conflict(format!("slug '{}' already exists", vehicle.slug)));
        }
        vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(slot) => {
                *slot = vehicle.clone();
                Ok(Some(vehicle))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        Ok(vehicles.len() < before)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_published(&self, limit: Option<i64>) -> AppResult<Vec<BlogPost>> {
        let posts = self.posts.read().await;
        let mut published: Vec<BlogPost> =
            posts.iter().filter(|p| p.is_published).cloned().collect();
        published.sort_by_key(|p| Reverse(p.created_at));
        if let Some(limit) = limit {
            published.truncate(limit.max(0) as usize);
        }
        Ok(published)
    }

    async fn list_all(&self) -> AppResult<Vec<BlogPost>> {
        let mut all = self.posts.read().await.clone();
        all.sort_by_key(|p| Reverse(p.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>> {
        Ok(self.posts.read().await.iter().find(|p| p.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        Ok(self.posts.read().await.iter().any(|p| p.slug == slug))
    }

    async fn insert(&self, post: BlogPost) -> AppResult<BlogPost> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(AppError::Conflict(format!("slug '{}' already exists", post.slug)));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: BlogPost) -> AppResult<Option<BlogPost>> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert(&self, booking: BookingRequest) -> AppResult<BookingRequest> {
        self.bookings.write().await.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookingRequest>> {
        Ok(self.bookings.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn list_recent(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
    ) -> AppResult<Vec<BookingRequest>> {
        let bookings = self.bookings.read().await;
        let mut recent: Vec<BookingRequest> = bookings
            .iter()
            .filter(|b| status.map_or(true, |s| b.status == s))
            .cloned()
            .collect();
        recent.sort_by_key(|b| Reverse(b.created_at));
        recent.truncate(limit.max(0) as usize);
        Ok(recent)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<BookingRequest>> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings
            .iter_mut()
            .find(|b| b.id == id && b.status == from)
            .map(|b| {
                b.status = to;
                b.clone()
            }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        Ok(bookings.len() < before)
    }

    async fn count_by_status(&self) -> AppResult<Vec<(BookingStatus, i64)>> {
        let bookings = self.bookings.read().await;
        Ok(BookingStatus::ALL
            .into_iter()
            .map(|status| {
                let count = bookings.iter().filter(|b| b.status == status).count() as i64;
                (status, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect())
    }
}

#[async_trait]
impl InquiryStore for MemoryStore {
    async fn insert(&self, inquiry: InquiryRequest) -> AppResult<InquiryRequest> {
        self.inquiries.write().await.push(inquiry.clone());
        Ok(inquiry)
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<InquiryRequest>> {
        let mut recent = self.inquiries.read().await.clone();
        recent.sort_by_key(|i| Reverse(i.created_at));
        recent.truncate(limit.max(0) as usize);
        Ok(recent)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.inquiries.read().await.len() as i64)
    }
}
