use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDetail, VehicleResponse, VehicleSummary,
};
use crate::models::vehicle::{Vehicle, VehicleCategory};
use crate::repositories::VehicleStore;
use crate::services::clock::Clock;
use crate::state::AppState;
use crate::utils::errors::{invalid_field, not_found_error, AppResult};
use crate::utils::slug::{allocate_slug, slugify};
use crate::utils::validation::{non_blank, validate_no_blank_entries, validate_non_negative_price};

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
    clock: Arc<dyn Clock>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.vehicles.clone(),
            clock: state.clock.clone(),
        }
    }

    /// Public listing. An unknown category filter matches nothing.
    pub async fn list_active(&self, category: Option<&str>) -> AppResult<Vec<VehicleSummary>> {
        let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<VehicleCategory>() {
                Ok(category) => Some(category),
                Err(_) => return Ok(Vec::new()),
            },
        };

        let vehicles = self.store.list_active(category).await?;
        Ok(vehicles.iter().map(VehicleSummary::from).collect())
    }

    /// Public detail; inactive vehicles are not found
    pub async fn get_public(&self, slug: &str) -> AppResult<VehicleDetail> {
        self.store
            .find_by_slug(slug)
            .await?
            .filter(|v| v.is_active)
            .map(|v| VehicleDetail::from(&v))
            .ok_or_else(|| not_found_error("Vehicle", slug))
    }

    pub async fn list_all(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.store.list_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;

        let store = self.store.clone();
        let slug = allocate_slug("Vehicle", request.slug.as_deref(), &request.name, |slug| {
            let store = store.clone();
            async move { store.slug_exists(&slug).await }
        })
        .await?;

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            slug,
            name: request.name.trim().to_string(),
            category: request.category,
            seats: request.seats,
            engine: non_blank(request.engine),
            description: request.description.trim().to_string(),
            features: trimmed(request.features),
            starting_price: request.starting_price,
            price_label: request.price_label.trim().to_string(),
            images: trimmed(request.images),
            is_active: request.is_active,
            rental_modes: trimmed(request.rental_modes),
            created_at: self.clock.now(),
        };

        let vehicle = self.store.insert(vehicle).await?;
        info!("🚗 Vehicle created: {} ({})", vehicle.name, vehicle.slug);
        Ok(vehicle.into())
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;
        let mut vehicle = self.find(id).await?;

        if let Some(raw) = request.slug.as_deref() {
            if slugify(raw) != vehicle.slug {
                let store = self.store.clone();
                vehicle.slug = allocate_slug("Vehicle", Some(raw), &vehicle.name, |slug| {
                    let store = store.clone();
                    async move { store.slug_exists(&slug).await }
                })
                .await?;
            }
        }

        if let Some(name) = request.name {
            vehicle.name = name.trim().to_string();
        }
        if let Some(category) = request.category {
            vehicle.category = category;
        }
        if let Some(seats) = request.seats {
            vehicle.seats = seats;
        }
        if let Some(engine) = request.engine {
            vehicle.engine = non_blank(engine);
        }
        if let Some(description) = request.description {
            vehicle.description = description.trim().to_string();
        }
        if let Some(features) = request.features {
            validate_list("features", &features)?;
            vehicle.features = trimmed(features);
        }
        if let Some(starting_price) = request.starting_price {
            if let Some(price) = &starting_price {
                validate_non_negative_price(price).map_err(|e| invalid_field("starting_price", e))?;
            }
            vehicle.starting_price = starting_price;
        }
        if let Some(price_label) = request.price_label {
            vehicle.price_label = price_label.trim().to_string();
        }
        if let Some(images) = request.images {
            validate_list("images", &images)?;
            vehicle.images = trimmed(images);
        }
        if let Some(is_active) = request.is_active {
            vehicle.is_active = is_active;
        }
        if let Some(rental_modes) = request.rental_modes {
            validate_list("rental_modes", &rental_modes)?;
            vehicle.rental_modes = trimmed(rental_modes);
        }

        let vehicle = self
            .store
            .update(vehicle)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        info!("🚗 Vehicle updated: {}", vehicle.slug);
        Ok(vehicle.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        info!("🗑️ Vehicle deleted: {}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<Vehicle> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }
}

fn trimmed(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.trim().to_string()).collect()
}

fn validate_list(field: &'static str, values: &[String]) -> AppResult<()> {
    validate_no_blank_entries(values).map_err(|e| invalid_field(field, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::EnvironmentConfig;
    use crate::repositories::{CatalogSnapshot, MemoryStore};
    use crate::services::clock::FixedClock;
    use crate::utils::errors::AppError;

    fn controller() -> VehicleController {
        let store = Arc::new(MemoryStore::from_snapshot(CatalogSnapshot::bundled().unwrap()));
        let state = AppState::in_memory(store, EnvironmentConfig::development(String::new()))
            .with_clock(Arc::new(FixedClock::on(2026, 1, 1)));
        VehicleController::new(&state)
    }

    fn create_request(name: &str) -> CreateVehicleRequest {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "category": "Economy",
            "seats": 4,
            "starting_price": 3200
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_active_excludes_inactive() {
        let vehicles = controller().list_active(None).await.unwrap();
        assert!(!vehicles.is_empty());
        assert!(vehicles.iter().all(|v| v.slug != "nissan-sunny"));
    }

    #[tokio::test]
    async fn test_list_active_filters_by_category() {
        let controller = controller();
        let buses = controller.list_active(Some("bus")).await.unwrap();
        assert_eq!(buses.len(), 1);
        assert_eq!(buses[0].price, "Contact for pricing");
        assert!(controller.list_active(Some("tractor")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_public_detail_hides_inactive() {
        let controller = controller();
        let detail = controller.get_public("toyota-axio").await.unwrap();
        assert_eq!(detail.summary.price, "৳3,500 per day");
        assert!(matches!(
            controller.get_public("nissan-sunny").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            controller.get_public("no-such-car").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_generates_unique_slugs() {
        let controller = controller();
        let first = controller.create(create_request("Honda Grace")).await.unwrap();
        assert_eq!(first.vehicle.slug, "honda-grace");

        let second = controller.create(create_request("Honda Grace")).await.unwrap();
        assert!(second.vehicle.slug.starts_with("honda-grace-"));
        assert_ne!(first.vehicle.slug, second.vehicle.slug);
    }

    #[tokio::test]
    async fn test_create_with_taken_slug_conflicts() {
        let mut request = create_request("Another Axio");
        request.slug = Some("toyota-axio".to_string());
        assert!(matches!(
            controller().create(request).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_clears_price_and_deactivates() {
        let controller = controller();
        let id = Uuid::parse_str("3f6c1f0e-6a3b-4c39-9d0a-0f5a1e2b7c01").unwrap();
        let patch: UpdateVehicleRequest =
            serde_json::from_str(r#"{"starting_price": null, "is_active": false}"#).unwrap();

        let updated = controller.update(id, patch).await.unwrap();
        assert_eq!(updated.vehicle.starting_price, None);
        assert_eq!(updated.price, "Contact for pricing");
        assert!(controller.get_public("toyota-axio").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        assert!(matches!(
            controller().delete(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
