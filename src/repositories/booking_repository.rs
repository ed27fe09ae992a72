use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::BookingStore;
use crate::models::booking::{BookingRequest, BookingStatus};
use crate::utils::errors::AppResult;

const BOOKING_COLUMNS: &str = "id, name, phone, email, vehicle_id, vehicle_name, rental_type, \
     pickup_date, return_date, pickup_location, message, status, created_at";

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn insert(&self, booking: BookingRequest) -> AppResult<BookingRequest> {
        let sql = format!(
            r#"
            INSERT INTO booking_requests ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            BOOKING_COLUMNS, BOOKING_COLUMNS
        );
        let booking = sqlx::query_as::<_, BookingRequest>(&sql)
            .bind(booking.id)
            .bind(booking.name)
            .bind(booking.phone)
            .bind(booking.email)
            .bind(booking.vehicle_id)
            .bind(booking.vehicle_name)
            .bind(booking.rental_type)
            .bind(booking.pickup_date)
            .bind(booking.return_date)
            .bind(booking.pickup_location)
            .bind(booking.message)
            .bind(booking.status)
            .bind(booking.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookingRequest>> {
        let sql = format!("SELECT {} FROM booking_requests WHERE id = $1", BOOKING_COLUMNS);
        let booking = sqlx::query_as::<_, BookingRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn list_recent(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
    ) -> AppResult<Vec<BookingRequest>> {
        let sql = format!(
            "SELECT {} FROM booking_requests \
             WHERE ($1::booking_status IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2",
            BOOKING_COLUMNS
        );
        let bookings = sqlx::query_as::<_, BookingRequest>(&sql)
            .bind(status)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<BookingRequest>> {
        let sql = format!(
            "UPDATE booking_requests SET status = $2 WHERE id = $1 AND status = $3 RETURNING {}",
            BOOKING_COLUMNS
        );
        let booking = sqlx::query_as::<_, BookingRequest>(&sql)
            .bind(id)
            .bind(to)
            .bind(from)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM booking_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self) -> AppResult<Vec<(BookingStatus, i64)>> {
        let rows: Vec<(BookingStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM booking_requests GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
