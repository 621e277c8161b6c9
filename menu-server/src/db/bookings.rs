//! Booking database operations

use shared::models::{Booking, BookingCreate};
use sqlx::PgPool;

use super::BoxError;

pub async fn create(pool: &PgPool, data: &BookingCreate) -> Result<Booking, BoxError> {
    let booking: Booking = sqlx::query_as(
        r#"
        INSERT INTO bookings (name, email, phone, date, time, guests)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.date)
    .bind(&data.time)
    .bind(data.guests)
    .fetch_one(pool)
    .await?;
    Ok(booking)
}
