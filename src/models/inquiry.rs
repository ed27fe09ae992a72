//! Inquiry model - contact form submissions, no status lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::booking::RentalType;

/// Inquiry row - maps to the `inquiries` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct InquiryRequest {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_name: Option<String>,
    pub rental_type: Option<RentalType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
