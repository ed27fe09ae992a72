use async_trait::async_trait;
use sqlx::PgPool;

use super::InquiryStore;
use crate::models::inquiry::InquiryRequest;
use crate::utils::errors::AppResult;

const INQUIRY_COLUMNS: &str = "id, name, phone, email, vehicle_id, vehicle_name, rental_type, \
     start_date, end_date, message, created_at";

pub struct InquiryRepository {
    pool: PgPool,
}

impl InquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryStore for InquiryRepository {
    async fn insert(&self, inquiry: InquiryRequest) -> AppResult<InquiryRequest> {
        let sql = format!(
            r#"
            INSERT INTO inquiries ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            INQUIRY_COLUMNS, INQUIRY_COLUMNS
        );
        let inquiry = sqlx::query_as::<_, InquiryRequest>(&sql)
            .bind(inquiry.id)
            .bind(inquiry.name)
            .bind(inquiry.phone)
            .bind(inquiry.email)
            .bind(inquiry.vehicle_id)
            .bind(inquiry.vehicle_name)
            .bind(inquiry.rental_type)
            .bind(inquiry.start_date)
            .bind(inquiry.end_date)
            .bind(inquiry.message)
            .bind(inquiry.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(inquiry)
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<InquiryRequest>> {
        let sql = format!(
            "SELECT {} FROM inquiries ORDER BY created_at DESC LIMIT $1",
            INQUIRY_COLUMNS
        );
        let inquiries = sqlx::query_as::<_, InquiryRequest>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(inquiries)
    }

    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM inquiries")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
