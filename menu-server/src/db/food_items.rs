//! Food library database operations

use shared::models::{FoodCategory, FoodItem, FoodItemCreate, FoodItemUpdate};
use sqlx::PgPool;

use super::BoxError;

/// List food items, optionally filtered by category and active flag.
/// Library ordering is category, then name.
pub async fn list(
    pool: &PgPool,
    category: Option<FoodCategory>,
    active: Option<bool>,
) -> Result<Vec<FoodItem>, BoxError> {
    let items: Vec<FoodItem> = sqlx::query_as(
        r#"
        SELECT * FROM food_items
        WHERE ($1::food_category IS NULL OR category = $1)
          AND ($2::boolean IS NULL OR is_active = $2)
        ORDER BY category, name
        "#,
    )
    .bind(category)
    .bind(active)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<FoodItem>, BoxError> {
    let item: Option<FoodItem> = sqlx::query_as("SELECT * FROM food_items WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// How many of the given ids exist in the library (ids are distinct)
pub async fn count_existing(pool: &PgPool, ids: &[i64]) -> Result<i64, BoxError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM food_items WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn create(pool: &PgPool, data: &FoodItemCreate) -> Result<FoodItem, BoxError> {
    let item: FoodItem = sqlx::query_as(
        r#"
        INSERT INTO food_items (name, category, price, description, image,
                                is_veg, spice_level, tags, allergens, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, true)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(data.category)
    .bind(data.price)
    .bind(data.description.as_deref().unwrap_or(""))
    .bind(data.image.as_deref().unwrap_or(""))
    .bind(data.is_veg.unwrap_or(false))
    .bind(data.spice_level.unwrap_or_default())
    .bind(data.tags.as_deref().unwrap_or(&[]))
    .bind(data.allergens.as_deref().unwrap_or(&[]))
    .fetch_one(pool)
    .await?;
    Ok(item)
}

/// Partial update; absent fields keep their stored value
pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &FoodItemUpdate,
) -> Result<Option<FoodItem>, BoxError> {
    let item: Option<FoodItem> = sqlx::query_as(
        r#"
        UPDATE food_items SET
            name = COALESCE($1, name),
            category = COALESCE($2, category),
            price = COALESCE($3, price),
            description = COALESCE($4, description),
            image = COALESCE($5, image),
            is_veg = COALESCE($6, is_veg),
            spice_level = COALESCE($7, spice_level),
            tags = COALESCE($8, tags),
            allergens = COALESCE($9, allergens),
            is_active = COALESCE($10, is_active),
            updated_at = now()
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(data.category)
    .bind(data.price)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.is_veg)
    .bind(data.spice_level)
    .bind(&data.tags)
    .bind(&data.allergens)
    .bind(data.is_active)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Hard delete; link rows cascade
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let rows = sqlx::query("DELETE FROM food_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
