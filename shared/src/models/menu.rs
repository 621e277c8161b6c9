//! Menu Models
//!
//! A menu is either the single default menu (`menu_date` null) or a
//! date-specific menu. Items link through `menu_food_items` and carry
//! a presentation overlay: display order plus an optional discount.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::food_item::FoodItem;

/// Discount kind on a menu-item link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "discount_kind", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percent,
    Fixed,
}

/// Menu entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i64,
    /// `None` for the default menu
    pub menu_date: Option<NaiveDate>,
    pub is_default: bool,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A food item as it appears on a resolved menu
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    #[serde(flatten)]
    pub item: FoodItem,
    pub display_order: i32,
    pub discount_type: Option<DiscountKind>,
    pub discount_value: Option<Decimal>,
    /// Discounted price, present only when visibly lower than base
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_price: Option<Decimal>,
    pub image_url: Option<String>,
}

/// Result of menu resolution for a requested date
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMenu {
    pub items: Vec<MenuItemView>,
    /// `true` when no date-specific menu matched and the default
    /// menu (or nothing) was served
    pub used_default_menu: bool,
}

/// Default menu with its items (admin view)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultMenuView {
    pub menu: Menu,
    pub items: Vec<MenuItemView>,
}

/// A dated menu in the planner listing
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SpecialDate {
    pub id: i64,
    pub menu_date: NaiveDate,
    pub name: Option<String>,
    pub item_count: i64,
}

/// One item entry when composing a menu (or adding to the default)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemEntry {
    pub food_item_id: i64,
    pub discount_type: Option<String>,
    pub discount_value: Option<Decimal>,
}

impl MenuItemEntry {
    /// Normalize this entry's discount overlay (see [`normalize_discount`])
    pub fn normalized_discount(
        &self,
    ) -> Result<(Option<DiscountKind>, Option<Decimal>), AppError> {
        normalize_discount(self.discount_type.as_deref(), self.discount_value)
    }
}

/// Discount overlay patch for one item on a menu
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPatch {
    pub discount_type: Option<String>,
    pub discount_value: Option<Decimal>,
}

impl DiscountPatch {
    pub fn normalized(&self) -> Result<(Option<DiscountKind>, Option<Decimal>), AppError> {
        normalize_discount(self.discount_type.as_deref(), self.discount_value)
    }
}

/// Upsert payload for a date-specific menu
///
/// `items` takes precedence over the legacy `foodItemIds` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuUpsert {
    pub menu_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub items: Option<Vec<MenuItemEntry>>,
    pub food_item_ids: Option<Vec<i64>>,
}

impl MenuUpsert {
    pub fn entries(&self) -> Vec<MenuItemEntry> {
        entries_from(self.items.as_deref(), self.food_item_ids.as_deref())
    }
}

/// Replace payload for an existing menu's item list
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemsReplace {
    pub items: Option<Vec<MenuItemEntry>>,
    pub food_item_ids: Option<Vec<i64>>,
}

impl MenuItemsReplace {
    pub fn entries(&self) -> Vec<MenuItemEntry> {
        entries_from(self.items.as_deref(), self.food_item_ids.as_deref())
    }
}

fn entries_from(items: Option<&[MenuItemEntry]>, ids: Option<&[i64]>) -> Vec<MenuItemEntry> {
    match items {
        Some(items) if !items.is_empty() => items.to_vec(),
        _ => ids
            .unwrap_or_default()
            .iter()
            .map(|&id| MenuItemEntry {
                food_item_id: id,
                discount_type: None,
                discount_value: None,
            })
            .collect(),
    }
}

/// One position assignment in a reorder request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    pub item_id: i64,
    pub display_order: i32,
}

/// Bulk reorder payload for one container
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub items: Vec<ReorderEntry>,
}

/// Normalize a raw discount descriptor into a stored overlay.
///
/// Unknown kinds are stored as "no discount" rather than erroring.
/// The pair invariant holds on the way in: a kind without a value (or
/// the reverse) collapses to no discount. Negative values, and percent
/// values above 100, are rejected.
pub fn normalize_discount(
    kind: Option<&str>,
    value: Option<Decimal>,
) -> Result<(Option<DiscountKind>, Option<Decimal>), AppError> {
    let kind = match kind {
        Some("percent") => DiscountKind::Percent,
        Some("fixed") => DiscountKind::Fixed,
        _ => return Ok((None, None)),
    };
    let Some(value) = value else {
        return Ok((None, None));
    };
    if value < Decimal::ZERO {
        return Err(AppError::validation("discountValue must not be negative"));
    }
    if kind == DiscountKind::Percent && value > Decimal::from(100) {
        return Err(AppError::validation("percent discount cannot exceed 100"));
    }
    Ok((Some(kind), Some(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn unknown_kind_normalizes_to_no_discount() {
        assert_eq!(
            normalize_discount(Some("bogo"), Some(dec("10"))).unwrap(),
            (None, None)
        );
        assert_eq!(normalize_discount(None, Some(dec("10"))).unwrap(), (None, None));
    }

    #[test]
    fn kind_without_value_collapses() {
        assert_eq!(normalize_discount(Some("percent"), None).unwrap(), (None, None));
    }

    #[test]
    fn negative_value_rejected() {
        assert!(normalize_discount(Some("fixed"), Some(dec("-1"))).is_err());
    }

    #[test]
    fn percent_above_hundred_rejected() {
        assert!(normalize_discount(Some("percent"), Some(dec("101"))).is_err());
        assert!(normalize_discount(Some("percent"), Some(dec("100"))).is_ok());
    }

    #[test]
    fn valid_pairs_pass_through() {
        assert_eq!(
            normalize_discount(Some("fixed"), Some(dec("2.50"))).unwrap(),
            (Some(DiscountKind::Fixed), Some(dec("2.50")))
        );
    }

    #[test]
    fn upsert_falls_back_to_legacy_id_list() {
        let payload: MenuUpsert = serde_json::from_str(
            r#"{"menuDate":"2026-08-14","foodItemIds":[3,1,2]}"#,
        )
        .unwrap();
        let entries = payload.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].food_item_id, 3);
        assert!(entries.iter().all(|e| e.discount_type.is_none()));
    }

    #[test]
    fn reorder_entry_uses_camel_case() {
        let entry: ReorderEntry =
            serde_json::from_str(r#"{"itemId":7,"displayOrder":2}"#).unwrap();
        assert_eq!(entry.item_id, 7);
        assert_eq!(entry.display_order, 2);
    }
}
