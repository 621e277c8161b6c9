//! Menu API
//!
//! Customer-facing resolution plus the admin planner: the default
//! menu, date-specific menus and display ordering.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use shared::error::AppError;
use shared::models::{
    DefaultMenuView, DiscountPatch, Menu, MenuItemEntry, MenuItemsReplace, MenuUpsert,
    ReorderRequest, ResolvedMenu, SpecialDate,
};
use shared::response::MessageResponse;

use crate::api::{convert, ensure_items_exist};
use crate::db;
use crate::db::menus::NormalizedEntry;
use crate::error::ServiceResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/menus", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(resolve_menu).post(upsert_menu))
        .route("/special-dates", get(list_special_dates))
        .route("/default", get(get_default_menu))
        .route("/default/items", post(add_default_item))
        .route(
            "/default/items/{food_item_id}",
            patch(update_default_item).delete(remove_default_item),
        )
        .route("/default/reorder", patch(reorder_default_menu))
        .route("/{id}", put(replace_menu_items).delete(delete_menu))
        .route("/{id}/set-default", post(set_default_menu))
        .route("/{id}/reorder", patch(reorder_menu_items))
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub date: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::validation("date must be YYYY-MM-DD")),
    }
}

/// GET /api/menus?date= - the menu customers see for a date
///
/// A date-specific menu wins; otherwise the default menu. No default
/// at all is an empty result, not an error.
pub async fn resolve_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ServiceResult<Json<ResolvedMenu>> {
    let date = parse_date(query.date.as_deref())?;
    let resolution = db::menus::resolve(&state.pool, date).await?;
    let items = convert::menu_item_views(&state.images, resolution.items).await;
    Ok(Json(ResolvedMenu {
        items,
        used_default_menu: resolution.used_default_menu,
    }))
}

/// GET /api/menus/special-dates - dated menus for the planner
pub async fn list_special_dates(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<SpecialDate>>> {
    let dates = db::menus::special_dates(&state.pool).await?;
    Ok(Json(dates))
}

/// GET /api/menus/default - the default menu and its items
pub async fn get_default_menu(
    State(state): State<AppState>,
) -> ServiceResult<Json<DefaultMenuView>> {
    let menu = db::menus::find_default(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Default menu"))?;
    let rows = db::menus::items_for_menu(&state.pool, menu.id).await?;
    let items = convert::menu_item_views(&state.images, rows).await;
    Ok(Json(DefaultMenuView { menu, items }))
}

/// POST /api/menus/default/items - add one item to the default menu
pub async fn add_default_item(
    State(state): State<AppState>,
    Json(entry): Json<MenuItemEntry>,
) -> ServiceResult<(StatusCode, Json<MessageResponse>)> {
    let menu_id = db::menus::default_menu_id(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Default menu"))?;
    db::food_items::get(&state.pool, entry.food_item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item {}", entry.food_item_id)))?;

    let (discount_type, discount_value) = entry.normalized_discount()?;
    db::menus::add_item(
        &state.pool,
        menu_id,
        entry.food_item_id,
        discount_type,
        discount_value,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Added to default menu")),
    ))
}

/// PATCH /api/menus/default/items/{food_item_id} - update one item's discount
pub async fn update_default_item(
    State(state): State<AppState>,
    Path(food_item_id): Path<i64>,
    Json(patch): Json<DiscountPatch>,
) -> ServiceResult<Json<MessageResponse>> {
    let menu_id = db::menus::default_menu_id(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Default menu"))?;
    let (discount_type, discount_value) = patch.normalized()?;
    let updated = db::menus::update_item_discount(
        &state.pool,
        menu_id,
        food_item_id,
        discount_type,
        discount_value,
    )
    .await?;
    if !updated {
        return Err(AppError::not_found("Item on default menu").into());
    }
    Ok(Json(MessageResponse::new("Discount updated")))
}

/// DELETE /api/menus/default/items/{food_item_id} - unlink one item
pub async fn remove_default_item(
    State(state): State<AppState>,
    Path(food_item_id): Path<i64>,
) -> ServiceResult<Json<MessageResponse>> {
    let menu_id = db::menus::default_menu_id(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Default menu"))?;
    db::menus::remove_item(&state.pool, menu_id, food_item_id).await?;
    Ok(Json(MessageResponse::new("Removed from default menu")))
}

async fn normalize_entries(
    state: &AppState,
    entries: &[MenuItemEntry],
) -> ServiceResult<Vec<NormalizedEntry>> {
    let ids: Vec<i64> = entries.iter().map(|e| e.food_item_id).collect();
    ensure_items_exist(&state.pool, &ids).await?;
    let mut normalized = Vec::with_capacity(entries.len());
    for entry in entries {
        let (discount_type, discount_value) = entry.normalized_discount()?;
        normalized.push(NormalizedEntry {
            food_item_id: entry.food_item_id,
            discount_type,
            discount_value,
        });
    }
    Ok(normalized)
}

/// POST /api/menus - create or replace the menu for a date
pub async fn upsert_menu(
    State(state): State<AppState>,
    Json(payload): Json<MenuUpsert>,
) -> ServiceResult<(StatusCode, Json<Menu>)> {
    let Some(menu_date) = payload.menu_date else {
        return Err(AppError::validation("menuDate required for date-specific menu").into());
    };
    let entries = normalize_entries(&state, &payload.entries()).await?;
    let (menu, created) =
        db::menus::upsert_for_date(&state.pool, menu_date, payload.name.as_deref(), &entries)
            .await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    tracing::info!(menu_id = menu.id, %menu_date, items = entries.len(), "Date menu saved");
    Ok((status, Json(menu)))
}

/// PUT /api/menus/{id} - replace a menu's item list
pub async fn replace_menu_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemsReplace>,
) -> ServiceResult<Json<MessageResponse>> {
    let entries = normalize_entries(&state, &payload.entries()).await?;
    if !db::menus::replace_items(&state.pool, id, &entries).await? {
        return Err(AppError::not_found(format!("Menu {id}")).into());
    }
    Ok(Json(MessageResponse::new("Menu updated successfully")))
}

/// POST /api/menus/{id}/set-default - reassign the default flag
pub async fn set_default_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<MessageResponse>> {
    if !db::menus::set_default(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Menu {id}")).into());
    }
    tracing::info!(menu_id = id, "Default menu reassigned");
    Ok(Json(MessageResponse::new("Default menu updated")))
}

/// DELETE /api/menus/{id} - delete a date menu
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<MessageResponse>> {
    let menu = db::menus::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu {id}")))?;
    if menu.is_default {
        return Err(AppError::validation("cannot delete the default menu").into());
    }
    db::menus::delete(&state.pool, id).await?;
    Ok(Json(MessageResponse::new("Menu deleted successfully")))
}

/// PATCH /api/menus/default/reorder - bulk display order for the default menu
pub async fn reorder_default_menu(
    State(state): State<AppState>,
    Json(payload): Json<ReorderRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    let menu_id = db::menus::default_menu_id(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Default menu"))?;
    db::menus::reorder_items(&state.pool, menu_id, &payload.items).await?;
    Ok(Json(MessageResponse::new("Order updated successfully")))
}

/// PATCH /api/menus/{id}/reorder - bulk display order for a date menu
pub async fn reorder_menu_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReorderRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    db::menus::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu {id}")))?;
    db::menus::reorder_items(&state.pool, id, &payload.items).await?;
    Ok(Json(MessageResponse::new("Order updated successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_days() {
        assert_eq!(
            parse_date(Some("2026-08-14")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 14)
        );
        assert_eq!(parse_date(None).unwrap(), None);
        assert_eq!(parse_date(Some("")).unwrap(), None);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date(Some("14/08/2026")).is_err());
        assert!(parse_date(Some("2026-13-40")).is_err());
        assert!(parse_date(Some("tomorrow")).is_err());
    }
}
