//! Bookings API
//!
//! Write-only: customers create reservations, nothing reads them back
//! through this service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use shared::models::{Booking, BookingCreate};

use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/bookings", post(create_booking))
}

/// POST /api/bookings - create a reservation
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingCreate>,
) -> ServiceResult<(StatusCode, Json<Booking>)> {
    payload.validate()?;
    let booking = db::bookings::create(&state.pool, &payload).await?;
    tracing::info!(
        id = booking.id,
        date = %booking.date,
        guests = booking.guests,
        "Booking created"
    );
    Ok((StatusCode::CREATED, Json(booking)))
}
