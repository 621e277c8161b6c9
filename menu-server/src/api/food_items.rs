//! Food Library API
//!
//! Admin CRUD over the dish library. Deleting an item cascades to its
//! menu and deal links; deactivating hides it from resolution without
//! touching the links.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use shared::error::AppError;
use shared::models::{FoodCategory, FoodItemCreate, FoodItemUpdate, FoodItemView};
use shared::response::MessageResponse;

use crate::api::convert;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/food-items", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_food_items).post(create_food_item))
        .route(
            "/{id}",
            get(get_food_item).put(update_food_item).delete(delete_food_item),
        )
}

#[derive(Debug, Deserialize)]
pub struct FoodItemFilter {
    pub category: Option<FoodCategory>,
    pub active: Option<bool>,
}

/// GET /api/food-items - list the library, with optional filters
pub async fn list_food_items(
    State(state): State<AppState>,
    Query(filter): Query<FoodItemFilter>,
) -> ServiceResult<Json<Vec<FoodItemView>>> {
    let items = db::food_items::list(&state.pool, filter.category, filter.active).await?;
    Ok(Json(convert::food_item_views(&state.images, items).await))
}

/// GET /api/food-items/{id} - single item
pub async fn get_food_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<FoodItemView>> {
    let item = db::food_items::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item {id}")))?;
    Ok(Json(convert::food_item_view(&state.images, item).await))
}

/// POST /api/food-items - add a dish to the library
pub async fn create_food_item(
    State(state): State<AppState>,
    Json(payload): Json<FoodItemCreate>,
) -> ServiceResult<(StatusCode, Json<FoodItemView>)> {
    payload.validate()?;
    let item = db::food_items::create(&state.pool, &payload).await?;
    tracing::info!(id = item.id, name = %item.name, "Food item created");
    Ok((
        StatusCode::CREATED,
        Json(convert::food_item_view(&state.images, item).await),
    ))
}

/// PUT /api/food-items/{id} - update a dish (partial)
pub async fn update_food_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<FoodItemUpdate>,
) -> ServiceResult<Json<FoodItemView>> {
    payload.validate()?;
    let item = db::food_items::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item {id}")))?;
    Ok(Json(convert::food_item_view(&state.images, item).await))
}

/// DELETE /api/food-items/{id} - remove a dish and all of its links
pub async fn delete_food_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<MessageResponse>> {
    if !db::food_items::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Food item {id}")).into());
    }
    tracing::info!(id, "Food item deleted");
    Ok(Json(MessageResponse::new("Food item deleted successfully")))
}
