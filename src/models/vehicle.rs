//! Vehicle model
//!
//! Maps to the `vehicles` table. `is_active` is the soft-delete switch: an
//! inactive vehicle stays in the catalog for admin history but disappears
//! from every public read.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Vehicle category - maps to the `vehicle_category` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_category", rename_all = "lowercase")]
pub enum VehicleCategory {
    Economy,
    Luxury,
    Bus,
}

impl VehicleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Economy => "Economy",
            VehicleCategory::Luxury => "Luxury",
            VehicleCategory::Bus => "Bus",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(VehicleCategory::Economy),
            "luxury" => Ok(VehicleCategory::Luxury),
            "bus" => Ok(VehicleCategory::Bus),
            other => Err(format!("unknown vehicle category '{}'", other)),
        }
    }
}

/// Vehicle row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub category: VehicleCategory,
    pub seats: i32,
    pub engine: Option<String>,
    pub description: String,
    pub features: Vec<String>,
    pub starting_price: Option<Decimal>,
    pub price_label: String,
    pub images: Vec<String>,
    pub is_active: bool,
    pub rental_modes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
