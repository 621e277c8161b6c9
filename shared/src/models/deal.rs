//! Deal Models
//!
//! A deal is a fixed-price bundle of food items with its own place in
//! the deals listing (display_order on the deal itself).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::food_item::FoodItem;

/// Deal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Stored reference: absolute URL or object-store key
    pub image: String,
    pub price: Decimal,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Deal with a display-ready image URL
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealView {
    #[serde(flatten)]
    pub deal: Deal,
    pub image_url: Option<String>,
}

/// A food item as bundled into a deal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealItemView {
    #[serde(flatten)]
    pub item: FoodItem,
    pub display_order: i32,
    pub image_url: Option<String>,
}

/// Deal detail: the deal plus its bundled items
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDetail {
    #[serde(flatten)]
    pub deal: DealView,
    pub items: Vec<DealItemView>,
}

/// Create deal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCreate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub food_item_ids: Option<Vec<i64>>,
}

impl DealCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        if self.price < Decimal::ZERO {
            return Err(AppError::validation("price must not be negative"));
        }
        Ok(())
    }
}

/// Update deal payload (partial; `foodItemIds` replaces the bundle
/// when present)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DealUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub is_active: Option<bool>,
    pub food_item_ids: Option<Vec<i64>>,
}

impl DealUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(ref name) = self.name
            && name.trim().is_empty()
        {
            return Err(AppError::validation("name must not be empty"));
        }
        if let Some(price) = self.price
            && price < Decimal::ZERO
        {
            return Err(AppError::validation("price must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name() {
        let payload: DealCreate =
            serde_json::from_str(r#"{"name":"","price":19.99}"#).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_is_fully_optional() {
        let payload: DealUpdate = serde_json::from_str("{}").unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.food_item_ids.is_none());
    }
}
