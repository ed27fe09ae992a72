use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::double_option;
use crate::models::vehicle::{Vehicle, VehicleCategory};
use crate::services::presentation::{category_color, format_price};
use crate::utils::validation::{validate_no_blank_entries, validate_non_negative_price};

fn default_price_label() -> String {
    "per day".to_string()
}

fn default_true() -> bool {
    true
}

// Request to create a vehicle
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: String,

    /// Generated from `name` when absent
    pub slug: Option<String>,

    pub category: VehicleCategory,

    #[validate(range(min = 1, max = 80))]
    pub seats: i32,

    #[validate(length(max = 50))]
    pub engine: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[validate(custom = "validate_no_blank_entries")]
    pub features: Vec<String>,

    #[validate(custom = "validate_non_negative_price")]
    pub starting_price: Option<Decimal>,

    #[serde(default = "default_price_label")]
    #[validate(length(max = 40))]
    pub price_label: String,

    #[serde(default)]
    #[validate(custom = "validate_no_blank_entries")]
    pub images: Vec<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    #[validate(custom = "validate_no_blank_entries")]
    pub rental_modes: Vec<String>,
}

// Partial update; `null` clears an optional field
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category: Option<VehicleCategory>,
    #[validate(range(min = 1, max = 80))]
    pub seats: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub engine: Option<Option<String>>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub starting_price: Option<Option<Decimal>>,
    #[validate(length(max = 40))]
    pub price_label: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub rental_modes: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VehicleListQuery {
    pub category: Option<String>,
}

// Card shown on the public listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub category: VehicleCategory,
    pub category_color: &'static str,
    pub seats: i32,
    pub price: String,
    pub primary_image: Option<String>,
    pub features: Vec<String>,
    pub rental_modes: Vec<String>,
}

// Public detail page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleDetail {
    #[serde(flatten)]
    pub summary: VehicleSummary,
    pub engine: Option<String>,
    pub description: String,
    pub images: Vec<String>,
    pub starting_price: Option<Decimal>,
    pub price_label: String,
}

// Admin view: the raw row
#[derive(Debug, Clone, Serialize)]
pub struct VehicleResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub price: String,
}

impl From<&Vehicle> for VehicleSummary {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            slug: vehicle.slug.clone(),
            name: vehicle.name.clone(),
            category: vehicle.category,
            category_color: category_color(vehicle.category),
            seats: vehicle.seats,
            price: format_price(vehicle.starting_price, &vehicle.price_label),
            primary_image: vehicle.primary_image().map(str::to_string),
            features: vehicle.features.clone(),
            rental_modes: vehicle.rental_modes.clone(),
        }
    }
}

impl From<&Vehicle> for VehicleDetail {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            summary: VehicleSummary::from(vehicle),
            engine: vehicle.engine.clone(),
            description: vehicle.description.clone(),
            images: vehicle.images.clone(),
            starting_price: vehicle.starting_price,
            price_label: vehicle.price_label.clone(),
        }
    }
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        let price = format_price(vehicle.starting_price, &vehicle.price_label);
        Self { vehicle, price }
    }
}
