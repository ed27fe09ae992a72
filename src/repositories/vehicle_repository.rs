use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::VehicleStore;
use crate::models::vehicle::{Vehicle, VehicleCategory};
use crate::utils::errors::AppResult;

const VEHICLE_COLUMNS: &str = "id, slug, name, category, seats, engine, description, features, \
     starting_price, price_label, images, is_active, rental_modes, created_at";

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn list_active(&self, category: Option<VehicleCategory>) -> AppResult<Vec<Vehicle>> {
        let sql = format!(
            "SELECT {} FROM vehicles \
             WHERE is_active = TRUE AND ($1::vehicle_category IS NULL OR category = $1) \
             ORDER BY name ASC",
            VEHICLE_COLUMNS
        );
        let vehicles = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let sql = format!("SELECT {} FROM vehicles ORDER BY created_at DESC", VEHICLE_COLUMNS);
        let vehicles = sqlx::query_as::<_, Vehicle>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let sql = format!("SELECT {} FROM vehicles WHERE id = $1", VEHICLE_COLUMNS);
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Vehicle>> {
        let sql = format!("SELECT {} FROM vehicles WHERE slug = $1", VEHICLE_COLUMNS);
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let sql = format!(
            r#"
            INSERT INTO vehicles ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS, VEHICLE_COLUMNS
        );
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(vehicle.id)
            .bind(vehicle.slug)
            .bind(vehicle.name)
            .bind(vehicle.category)
            .bind(vehicle.seats)
            .bind(vehicle.engine)
            .bind(vehicle.description)
            .bind(vehicle.features)
            .bind(vehicle.starting_price)
            .bind(vehicle.price_label)
            .bind(vehicle.images)
            .bind(vehicle.is_active)
            .bind(vehicle.rental_modes)
            .bind(vehicle.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>> {
        let sql = format!(
            r#"
            UPDATE vehicles
            SET slug = $2, name = $3, category = $4, seats = $5, engine = $6, description = $7,
                features = $8, starting_price = $9, price_label = $10, images = $11,
                is_active = $12, rental_modes = $13
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        );
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(vehicle.id)
            .bind(vehicle.slug)
            .bind(vehicle.name)
            .bind(vehicle.category)
            .bind(vehicle.seats)
            .bind(vehicle.engine)
            .bind(vehicle.description)
            .bind(vehicle.features)
            .bind(vehicle.starting_price)
            .bind(vehicle.price_label)
            .bind(vehicle.images)
            .bind(vehicle.is_active)
            .bind(vehicle.rental_modes)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
