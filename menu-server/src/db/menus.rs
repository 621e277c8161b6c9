//! Menu database operations
//!
//! Resolution picks the date-specific menu when one exists, otherwise
//! the default menu. Item ordering is display_order with a
//! category/name tie-break for links sharing a position.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{DiscountKind, FoodItem, Menu, ReorderEntry, SpecialDate};
use sqlx::PgPool;

use super::BoxError;

/// Columns + join for menu item listings
const MENU_ITEMS_SQL: &str = r#"
    SELECT f.id, f.name, f.category, f.price, f.description, f.image,
           f.is_veg, f.spice_level, f.tags, f.allergens, f.is_active,
           f.created_at, f.updated_at,
           mfi.display_order, mfi.discount_type, mfi.discount_value
    FROM food_items f
    JOIN menu_food_items mfi ON f.id = mfi.food_item_id
    WHERE mfi.menu_id = $1 AND f.is_active = true
    ORDER BY mfi.display_order, f.category, f.name
"#;

/// One row of a menu's item listing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuItemRow {
    #[sqlx(flatten)]
    pub item: FoodItem,
    pub display_order: i32,
    pub discount_type: Option<DiscountKind>,
    pub discount_value: Option<Decimal>,
}

/// A normalized item entry ready for insertion
#[derive(Debug, Clone)]
pub struct NormalizedEntry {
    pub food_item_id: i64,
    pub discount_type: Option<DiscountKind>,
    pub discount_value: Option<Decimal>,
}

/// Resolution result: the active menu's items plus whether the
/// default menu was used (no date given, or no menu for that date)
#[derive(Debug)]
pub struct MenuResolution {
    pub items: Vec<MenuItemRow>,
    pub used_default_menu: bool,
}

/// Resolve which menu applies for an optional date and list its items.
/// No matching menu anywhere is an empty result, not an error.
pub async fn resolve(pool: &PgPool, date: Option<NaiveDate>) -> Result<MenuResolution, BoxError> {
    let mut used_default_menu = true;
    let mut menu_id: Option<i64> = None;

    if let Some(date) = date {
        menu_id = sqlx::query_scalar("SELECT id FROM menus WHERE menu_date = $1")
            .bind(date)
            .fetch_optional(pool)
            .await?;
        if menu_id.is_some() {
            used_default_menu = false;
        }
    }

    let menu_id = match menu_id {
        Some(id) => Some(id),
        None => default_menu_id(pool).await?,
    };

    let items = match menu_id {
        Some(id) => items_for_menu(pool, id).await?,
        None => Vec::new(),
    };

    Ok(MenuResolution {
        items,
        used_default_menu,
    })
}

pub async fn items_for_menu(pool: &PgPool, menu_id: i64) -> Result<Vec<MenuItemRow>, BoxError> {
    let rows: Vec<MenuItemRow> = sqlx::query_as(MENU_ITEMS_SQL)
        .bind(menu_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Menu>, BoxError> {
    let menu: Option<Menu> = sqlx::query_as("SELECT * FROM menus WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(menu)
}

pub async fn find_default(pool: &PgPool) -> Result<Option<Menu>, BoxError> {
    let menu: Option<Menu> =
        sqlx::query_as("SELECT * FROM menus WHERE is_default = true LIMIT 1")
            .fetch_optional(pool)
            .await?;
    Ok(menu)
}

pub async fn default_menu_id(pool: &PgPool) -> Result<Option<i64>, BoxError> {
    let id: Option<i64> =
        sqlx::query_scalar("SELECT id FROM menus WHERE is_default = true LIMIT 1")
            .fetch_optional(pool)
            .await?;
    Ok(id)
}

/// Dated menus for the admin planner, newest first
pub async fn special_dates(pool: &PgPool) -> Result<Vec<SpecialDate>, BoxError> {
    let rows: Vec<SpecialDate> = sqlx::query_as(
        r#"
        SELECT m.id, m.menu_date, m.name,
               (SELECT COUNT(*) FROM menu_food_items WHERE menu_id = m.id) AS item_count
        FROM menus m
        WHERE m.menu_date IS NOT NULL AND m.is_default = false
        ORDER BY m.menu_date DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Link one item to a menu, appended after the current last position.
/// Re-adding an item overwrites its overlay and re-appends it.
pub async fn add_item(
    pool: &PgPool,
    menu_id: i64,
    food_item_id: i64,
    discount_type: Option<DiscountKind>,
    discount_value: Option<Decimal>,
) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        INSERT INTO menu_food_items (menu_id, food_item_id, display_order,
                                     discount_type, discount_value)
        VALUES ($1, $2,
                (SELECT COALESCE(MAX(display_order) + 1, 0)
                 FROM menu_food_items WHERE menu_id = $1),
                $3, $4)
        ON CONFLICT (menu_id, food_item_id)
        DO UPDATE SET display_order = EXCLUDED.display_order,
                      discount_type = EXCLUDED.discount_type,
                      discount_value = EXCLUDED.discount_value
        "#,
    )
    .bind(menu_id)
    .bind(food_item_id)
    .bind(discount_type)
    .bind(discount_value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Update one link's discount overlay; false when the item is not on
/// the menu
pub async fn update_item_discount(
    pool: &PgPool,
    menu_id: i64,
    food_item_id: i64,
    discount_type: Option<DiscountKind>,
    discount_value: Option<Decimal>,
) -> Result<bool, BoxError> {
    let updated: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE menu_food_items SET discount_type = $1, discount_value = $2
        WHERE menu_id = $3 AND food_item_id = $4
        RETURNING id
        "#,
    )
    .bind(discount_type)
    .bind(discount_value)
    .bind(menu_id)
    .bind(food_item_id)
    .fetch_optional(pool)
    .await?;
    Ok(updated.is_some())
}

/// Unlink one item; remaining positions keep their gaps
pub async fn remove_item(pool: &PgPool, menu_id: i64, food_item_id: i64) -> Result<(), BoxError> {
    sqlx::query("DELETE FROM menu_food_items WHERE menu_id = $1 AND food_item_id = $2")
        .bind(menu_id)
        .bind(food_item_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Create or replace the menu for a date. Item positions follow the
/// list order. The whole operation is one transaction.
/// Returns the menu row and whether it was created.
pub async fn upsert_for_date(
    pool: &PgPool,
    menu_date: NaiveDate,
    name: Option<&str>,
    entries: &[NormalizedEntry],
) -> Result<(Menu, bool), BoxError> {
    let mut tx = pool.begin().await?;

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM menus WHERE menu_date = $1")
        .bind(menu_date)
        .fetch_optional(&mut *tx)
        .await?;

    let (menu_id, created) = match existing {
        Some(id) => {
            sqlx::query("DELETE FROM menu_food_items WHERE menu_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE menus SET name = COALESCE($1, name), updated_at = now() WHERE id = $2")
                .bind(name)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            (id, false)
        }
        None => {
            let default_name = format!("Menu for {menu_date}");
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO menus (menu_date, is_default, name) VALUES ($1, false, $2) RETURNING id",
            )
            .bind(menu_date)
            .bind(name.unwrap_or(&default_name))
            .fetch_one(&mut *tx)
            .await?;
            (id, true)
        }
    };

    insert_entries(&mut tx, menu_id, entries).await?;

    let menu: Menu = sqlx::query_as("SELECT * FROM menus WHERE id = $1")
        .bind(menu_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok((menu, created))
}

/// Replace an existing menu's item list in one transaction; false when
/// the menu does not exist
pub async fn replace_items(
    pool: &PgPool,
    menu_id: i64,
    entries: &[NormalizedEntry],
) -> Result<bool, BoxError> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM menus WHERE id = $1")
        .bind(menu_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Ok(false);
    }

    sqlx::query("DELETE FROM menu_food_items WHERE menu_id = $1")
        .bind(menu_id)
        .execute(&mut *tx)
        .await?;
    insert_entries(&mut tx, menu_id, entries).await?;
    sqlx::query("UPDATE menus SET updated_at = now() WHERE id = $1")
        .bind(menu_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

async fn insert_entries(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    menu_id: i64,
    entries: &[NormalizedEntry],
) -> Result<(), BoxError> {
    for (position, entry) in entries.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO menu_food_items (menu_id, food_item_id, display_order,
                                         discount_type, discount_value)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(menu_id)
        .bind(entry.food_item_id)
        .bind(position as i32)
        .bind(entry.discount_type)
        .bind(entry.discount_value)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Reassign the default flag. The clear + set pair runs in one
/// transaction, and the partial unique index on `menus(is_default)`
/// rules out two defaults even across racing writers.
/// Returns false when the menu does not exist.
pub async fn set_default(pool: &PgPool, menu_id: i64) -> Result<bool, BoxError> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM menus WHERE id = $1")
        .bind(menu_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Ok(false);
    }

    sqlx::query("UPDATE menus SET is_default = false WHERE is_default AND id <> $1")
        .bind(menu_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE menus SET is_default = true, updated_at = now() WHERE id = $1")
        .bind(menu_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

/// Delete a menu; links cascade. The default menu is guarded at the
/// API boundary before this is called.
pub async fn delete(pool: &PgPool, menu_id: i64) -> Result<bool, BoxError> {
    let rows = sqlx::query("DELETE FROM menus WHERE id = $1")
        .bind(menu_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Apply caller-supplied positions for one menu, each independently,
/// as a single bulk statement. Unknown item ids are ignored.
pub async fn reorder_items(
    pool: &PgPool,
    menu_id: i64,
    entries: &[ReorderEntry],
) -> Result<(), BoxError> {
    if entries.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = entries.iter().map(|e| e.item_id).collect();
    let orders: Vec<i32> = entries.iter().map(|e| e.display_order).collect();
    sqlx::query(
        r#"
        UPDATE menu_food_items SET display_order = u.display_order
        FROM (SELECT * FROM UNNEST($1::bigint[], $2::integer[])) AS u(food_item_id, display_order)
        WHERE menu_food_items.menu_id = $3
          AND menu_food_items.food_item_id = u.food_item_id
        "#,
    )
    .bind(&ids)
    .bind(&orders)
    .bind(menu_id)
    .execute(pool)
    .await?;
    Ok(())
}
