//! Deals API
//!
//! Fixed-price bundles with their own listing order plus per-deal item
//! ordering.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;

use shared::error::AppError;
use shared::models::{Deal, DealCreate, DealDetail, DealUpdate, DealView, ReorderRequest};
use shared::response::MessageResponse;

use crate::api::{convert, ensure_items_exist};
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/deals", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_deals).post(create_deal))
        .route("/reorder", patch(reorder_deals))
        .route("/{id}", get(get_deal).put(update_deal).delete(delete_deal))
        .route("/{id}/reorder", patch(reorder_deal_items))
}

#[derive(Debug, Deserialize)]
pub struct DealFilter {
    pub active: Option<bool>,
}

/// GET /api/deals - list deals in display order
pub async fn list_deals(
    State(state): State<AppState>,
    Query(filter): Query<DealFilter>,
) -> ServiceResult<Json<Vec<DealView>>> {
    let deals = db::deals::list(&state.pool, filter.active).await?;
    let mut views = Vec::with_capacity(deals.len());
    for deal in deals {
        let image_url = state.images.resolve(&deal.image).await;
        views.push(DealView { deal, image_url });
    }
    Ok(Json(views))
}

/// GET /api/deals/{id} - deal with its bundled items
pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<DealDetail>> {
    let deal = db::deals::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Deal {id}")))?;
    let rows = db::deals::items(&state.pool, id).await?;

    let image_url = state.images.resolve(&deal.image).await;
    let items = convert::deal_item_views(&state.images, rows).await;
    Ok(Json(DealDetail {
        deal: DealView { deal, image_url },
        items,
    }))
}

/// POST /api/deals - create a deal (appended to the listing)
pub async fn create_deal(
    State(state): State<AppState>,
    Json(payload): Json<DealCreate>,
) -> ServiceResult<(StatusCode, Json<Deal>)> {
    payload.validate()?;
    let item_ids = payload.food_item_ids.clone().unwrap_or_default();
    ensure_items_exist(&state.pool, &item_ids).await?;

    let deal = db::deals::create(&state.pool, &payload, &item_ids).await?;
    tracing::info!(id = deal.id, name = %deal.name, "Deal created");
    Ok((StatusCode::CREATED, Json(deal)))
}

/// PUT /api/deals/{id} - update a deal; `foodItemIds` replaces the bundle
pub async fn update_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DealUpdate>,
) -> ServiceResult<Json<MessageResponse>> {
    payload.validate()?;
    if let Some(ref item_ids) = payload.food_item_ids {
        ensure_items_exist(&state.pool, item_ids).await?;
    }
    if !db::deals::update(&state.pool, id, &payload).await? {
        return Err(AppError::not_found(format!("Deal {id}")).into());
    }
    Ok(Json(MessageResponse::new("Deal updated successfully")))
}

/// DELETE /api/deals/{id}
pub async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<MessageResponse>> {
    if !db::deals::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Deal {id}")).into());
    }
    tracing::info!(id, "Deal deleted");
    Ok(Json(MessageResponse::new("Deal deleted successfully")))
}

/// PATCH /api/deals/reorder - reorder the deals listing itself
pub async fn reorder_deals(
    State(state): State<AppState>,
    Json(payload): Json<ReorderRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    db::deals::reorder(&state.pool, &payload.items).await?;
    Ok(Json(MessageResponse::new("Order updated successfully")))
}

/// PATCH /api/deals/{id}/reorder - reorder items within one deal
pub async fn reorder_deal_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReorderRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    db::deals::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Deal {id}")))?;
    db::deals::reorder_items(&state.pool, id, &payload.items).await?;
    Ok(Json(MessageResponse::new("Order updated successfully")))
}
