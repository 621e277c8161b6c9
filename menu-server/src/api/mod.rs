//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness and store ping
//! - [`food_items`] - food library CRUD (admin)
//! - [`menus`] - menu resolution, default menu, date menus, reorder
//! - [`deals`] - deals CRUD and reordering
//! - [`bookings`] - table bookings
//! - [`images`] - dish image upload and proxy streaming

pub mod convert;

pub mod bookings;
pub mod deals;
pub mod food_items;
pub mod health;
pub mod images;
pub mod menus;

use std::collections::HashSet;

use axum::Router;
use shared::error::AppError;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(food_items::router())
        .merge(menus::router())
        .merge(deals::router())
        .merge(bookings::router())
        .merge(images::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Reject duplicate or unknown library ids before any store mutation
pub(crate) async fn ensure_items_exist(pool: &PgPool, ids: &[i64]) -> ServiceResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(
                AppError::validation(format!("duplicate food item {id} in list")).into(),
            );
        }
    }
    let distinct: Vec<i64> = seen.into_iter().collect();
    let count = db::food_items::count_existing(pool, &distinct).await?;
    if count as usize != distinct.len() {
        return Err(AppError::validation("unknown food item in list").into());
    }
    Ok(())
}
