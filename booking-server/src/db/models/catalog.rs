//! Catalog Models (food items and combos)
//!
//! The booking engine only reads prices from here, at order-creation time.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Food item entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Combo entity (套餐)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combo {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    pub price: f64,
}

/// Create combo payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboCreate {
    pub name: String,
    pub price: f64,
}

/// Price update payload (catalog administration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub price: f64,
}
