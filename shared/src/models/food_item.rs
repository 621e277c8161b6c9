//! Food Item Model
//!
//! The food library is the single source of truth for a dish. Menus
//! and deals only reference items and overlay presentation data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Menu section a dish belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "food_category", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Mains,
    Sides,
    Desserts,
    Drinks,
}

/// Spice level of a dish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "spice_level", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    #[default]
    None,
    Mild,
    Medium,
    Hot,
    ExtraHot,
}

/// Food item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub category: FoodCategory,
    pub price: Decimal,
    pub description: String,
    /// Stored reference: absolute URL or object-store key
    pub image: String,
    pub is_veg: bool,
    pub spice_level: SpiceLevel,
    pub tags: Vec<String>,
    pub allergens: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Food item with a display-ready image URL
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemView {
    #[serde(flatten)]
    pub item: FoodItem,
    /// Resolved URL for display; `null` when resolution failed
    pub image_url: Option<String>,
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemCreate {
    pub name: String,
    pub category: FoodCategory,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_veg: Option<bool>,
    pub spice_level: Option<SpiceLevel>,
    pub tags: Option<Vec<String>>,
    pub allergens: Option<Vec<String>>,
}

impl FoodItemCreate {
    /// Boundary validation; rejected before any store mutation
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

/// Update food item payload (partial; absent fields keep their value)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemUpdate {
    pub name: Option<String>,
    pub category: Option<FoodCategory>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_veg: Option<bool>,
    pub spice_level: Option<SpiceLevel>,
    pub tags: Option<Vec<String>>,
    pub allergens: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl FoodItemUpdate {
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
    use std::str::FromStr;

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FoodCategory::Desserts).unwrap(),
            "\"desserts\""
        );
        assert_eq!(
            serde_json::from_str::<FoodCategory>("\"drinks\"").unwrap(),
            FoodCategory::Drinks
        );
    }

    #[test]
    fn spice_level_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&SpiceLevel::ExtraHot).unwrap(),
            "\"extra_hot\""
        );
    }

    #[test]
    fn create_rejects_negative_price() {
        let payload = FoodItemCreate {
            name: "Dal Tadka".to_string(),
            category: FoodCategory::Mains,
            price: Decimal::from_str("-1.00").unwrap(),
            description: None,
            image: None,
            is_veg: Some(true),
            spice_level: None,
            tags: None,
            allergens: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_rejects_blank_name() {
        let payload = FoodItemCreate {
            name: "   ".to_string(),
            category: FoodCategory::Sides,
            price: Decimal::ONE,
            description: None,
            image: None,
            is_veg: None,
            spice_level: None,
            tags: None,
            allergens: None,
        };
        assert!(payload.validate().is_err());
    }
}
