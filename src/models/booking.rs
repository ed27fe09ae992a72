//! Booking model
//!
//! A booking request moves through a small status machine owned by the
//! lifecycle controller. `vehicle_name` is a snapshot taken when the row is
//! written and is never re-synced with later vehicle edits.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Booking status - maps to the `booking_status` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    New,
    Contacted,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::New,
        BookingStatus::Contacted,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::New => "new",
            BookingStatus::Contacted => "contacted",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    ///
    /// Forward moves along new -> contacted -> confirmed are allowed to skip
    /// `contacted`; `completed` needs a confirmed booking; any open booking
    /// may be cancelled. Terminal states have no outgoing edges.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        match (self, next) {
            (New, Contacted) | (New, Confirmed) => true,
            (Contacted, Confirmed) => true,
            (Confirmed, Completed) => true,
            (New | Contacted | Confirmed, Cancelled) => true,
            _ => false,
        }
    }

    pub fn allowed_targets(&self) -> Vec<BookingStatus> {
        Self::ALL
            .into_iter()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown booking status '{}'", s))
    }
}

/// Rental mode requested on a booking or inquiry - maps to the `rental_type` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalType {
    Daily,
    Weekly,
    Monthly,
    Corporate,
    Airport,
}

impl FromStr for RentalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RentalType::Daily),
            "weekly" => Ok(RentalType::Weekly),
            "monthly" => Ok(RentalType::Monthly),
            "corporate" => Ok(RentalType::Corporate),
            "airport" => Ok(RentalType::Airport),
            other => Err(format!("unknown rental type '{}'", other)),
        }
    }
}

/// Booking request row - maps to the `booking_requests` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct BookingRequest {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_name: Option<String>,
    pub rental_type: Option<RentalType>,
    pub pickup_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub pickup_location: Option<String>,
    pub message: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}
