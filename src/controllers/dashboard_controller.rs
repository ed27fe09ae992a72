use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::booking::BookingStatus;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Counts shown on the admin dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub admin: String,
    pub vehicles: usize,
    pub active_vehicles: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub bookings: BTreeMap<&'static str, i64>,
    pub open_bookings: i64,
    pub inquiries: i64,
}

pub async fn collect_stats(state: &AppState, admin: String) -> AppResult<DashboardStats> {
    let vehicles = state.vehicles.list_all().await?;
    let posts = state.posts.list_all().await?;
    let booking_counts = state.bookings.count_by_status().await?;
    let inquiries = state.inquiries.count().await?;

    let mut bookings: BTreeMap<&'static str, i64> =
        BookingStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
    for (status, count) in &booking_counts {
        bookings.insert(status.as_str(), *count);
    }
    let open_bookings = booking_counts
        .iter()
        .filter(|(status, _)| !status.is_terminal())
        .map(|(_, count)| count)
        .sum();

    let published_posts = posts.iter().filter(|p| p.is_published).count();

    Ok(DashboardStats {
        admin,
        active_vehicles: vehicles.iter().filter(|v| v.is_active).count(),
        vehicles: vehicles.len(),
        published_posts,
        draft_posts: posts.len() - published_posts,
        bookings,
        open_bookings,
        inquiries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::EnvironmentConfig;
    use crate::repositories::{CatalogSnapshot, MemoryStore};

    #[tokio::test]
    async fn test_stats_over_bundled_catalog() {
        let store = Arc::new(MemoryStore::from_snapshot(CatalogSnapshot::bundled().unwrap()));
        let state = AppState::in_memory(store, EnvironmentConfig::development(String::new()));

        let stats = collect_stats(&state, "admin".to_string()).await.unwrap();
        assert_eq!(stats.vehicles, 5);
        assert_eq!(stats.active_vehicles, 4);
        assert_eq!(stats.published_posts, 2);
        assert_eq!(stats.draft_posts, 1);
        assert_eq!(stats.bookings["new"], 0);
        assert_eq!(stats.open_bookings, 0);
    }
}
