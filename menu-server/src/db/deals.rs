//! Deal database operations

use shared::models::{Deal, DealCreate, DealUpdate, FoodItem, ReorderEntry};
use sqlx::PgPool;

use super::BoxError;

/// One row of a deal's bundled-item listing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DealItemRow {
    #[sqlx(flatten)]
    pub item: FoodItem,
    pub display_order: i32,
}

/// List deals, optionally filtered by active flag, in display order
pub async fn list(pool: &PgPool, active: Option<bool>) -> Result<Vec<Deal>, BoxError> {
    let deals: Vec<Deal> = sqlx::query_as(
        r#"
        SELECT * FROM deals
        WHERE ($1::boolean IS NULL OR is_active = $1)
        ORDER BY display_order, created_at DESC
        "#,
    )
    .bind(active)
    .fetch_all(pool)
    .await?;
    Ok(deals)
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Deal>, BoxError> {
    let deal: Option<Deal> = sqlx::query_as("SELECT * FROM deals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(deal)
}

/// Active items bundled into a deal, in display order
pub async fn items(pool: &PgPool, deal_id: i64) -> Result<Vec<DealItemRow>, BoxError> {
    let rows: Vec<DealItemRow> = sqlx::query_as(
        r#"
        SELECT f.id, f.name, f.category, f.price, f.description, f.image,
               f.is_veg, f.spice_level, f.tags, f.allergens, f.is_active,
               f.created_at, f.updated_at,
               di.display_order
        FROM food_items f
        JOIN deal_items di ON f.id = di.food_item_id
        WHERE di.deal_id = $1 AND f.is_active = true
        ORDER BY di.display_order, f.name
        "#,
    )
    .bind(deal_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a deal appended to the end of the deals listing, linking its
/// bundle in the same transaction
pub async fn create(
    pool: &PgPool,
    data: &DealCreate,
    food_item_ids: &[i64],
) -> Result<Deal, BoxError> {
    let mut tx = pool.begin().await?;

    let deal: Deal = sqlx::query_as(
        r#"
        INSERT INTO deals (name, description, image, price, display_order)
        VALUES ($1, $2, $3, $4,
                (SELECT COALESCE(MAX(display_order) + 1, 0) FROM deals))
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(data.description.as_deref().unwrap_or(""))
    .bind(data.image.as_deref().unwrap_or(""))
    .bind(data.price)
    .fetch_one(&mut *tx)
    .await?;

    insert_items(&mut tx, deal.id, food_item_ids).await?;

    tx.commit().await?;
    Ok(deal)
}

/// Partial update; replaces the bundle when `food_item_ids` is
/// present. One transaction. False when the deal does not exist.
pub async fn update(pool: &PgPool, id: i64, data: &DealUpdate) -> Result<bool, BoxError> {
    let mut tx = pool.begin().await?;

    let updated: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE deals SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            image = COALESCE($3, image),
            price = COALESCE($4, price),
            is_active = COALESCE($5, is_active),
            updated_at = now()
        WHERE id = $6
        RETURNING id
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.price)
    .bind(data.is_active)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        return Ok(false);
    }

    if let Some(ref item_ids) = data.food_item_ids {
        sqlx::query("DELETE FROM deal_items WHERE deal_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_items(&mut tx, id, item_ids).await?;
    }

    tx.commit().await?;
    Ok(true)
}

async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    deal_id: i64,
    food_item_ids: &[i64],
) -> Result<(), BoxError> {
    for (position, food_item_id) in food_item_ids.iter().enumerate() {
        sqlx::query(
            "INSERT INTO deal_items (deal_id, food_item_id, display_order) VALUES ($1, $2, $3)",
        )
        .bind(deal_id)
        .bind(food_item_id)
        .bind(position as i32)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let rows = sqlx::query("DELETE FROM deals WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Reorder items within one deal (bulk, idempotent)
pub async fn reorder_items(
    pool: &PgPool,
    deal_id: i64,
    entries: &[ReorderEntry],
) -> Result<(), BoxError> {
    if entries.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = entries.iter().map(|e| e.item_id).collect();
    let orders: Vec<i32> = entries.iter().map(|e| e.display_order).collect();
    sqlx::query(
        r#"
        UPDATE deal_items SET display_order = u.display_order
        FROM (SELECT * FROM UNNEST($1::bigint[], $2::integer[])) AS u(food_item_id, display_order)
        WHERE deal_items.deal_id = $3
          AND deal_items.food_item_id = u.food_item_id
        "#,
    )
    .bind(&ids)
    .bind(&orders)
    .bind(deal_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Reorder the deals listing itself (bulk, idempotent)
pub async fn reorder(pool: &PgPool, entries: &[ReorderEntry]) -> Result<(), BoxError> {
    if entries.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = entries.iter().map(|e| e.item_id).collect();
    let orders: Vec<i32> = entries.iter().map(|e| e.display_order).collect();
    sqlx::query(
        r#"
        UPDATE deals SET display_order = u.display_order, updated_at = now()
        FROM (SELECT * FROM UNNEST($1::bigint[], $2::integer[])) AS u(id, display_order)
        WHERE deals.id = u.id
        "#,
    )
    .bind(&ids)
    .bind(&orders)
    .execute(pool)
    .await?;
    Ok(())
}
