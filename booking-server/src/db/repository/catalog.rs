//! Catalog Repository (food items and combos)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Combo, ComboCreate, FoodItem, FoodItemCreate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const FOOD_TABLE: &str = "food_item";
const COMBO_TABLE: &str = "combo";

#[derive(Clone)]
pub struct CatalogRepository {
    base: BaseRepository,
}

impl CatalogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ========== Food items ==========

    /// All active food items
    pub async fn find_all_foods(&self) -> RepoResult<Vec<FoodItem>> {
        let foods: Vec<FoodItem> = self
            .base
            .db()
            .query("SELECT * FROM food_item WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(foods)
    }

    /// Find food item by id ("food_item:xxx")
    pub async fn find_food(&self, id: &str) -> RepoResult<Option<FoodItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let food: Option<FoodItem> = self.base.db().select(thing).await?;
        Ok(food)
    }

    /// Create a food item
    pub async fn create_food(&self, data: FoodItemCreate) -> RepoResult<FoodItem> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("Price must be non-negative".to_string()));
        }
        let food = FoodItem {
            id: None,
            name: data.name,
            price: data.price,
            is_active: true,
        };
        let created: Option<FoodItem> = self.base.db().create(FOOD_TABLE).content(food).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food item".to_string()))
    }

    /// Update a food item price
    pub async fn update_food_price(&self, id: &str, price: f64) -> RepoResult<FoodItem> {
        if price < 0.0 {
            return Err(RepoError::Validation("Price must be non-negative".to_string()));
        }
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET price = $price")
            .bind(("thing", thing))
            .bind(("price", price))
            .await?;
        self.find_food(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Food item {} not found", id)))
    }

    // ========== Combos ==========

    /// All active combos
    pub async fn find_all_combos(&self) -> RepoResult<Vec<Combo>> {
        let combos: Vec<Combo> = self
            .base
            .db()
            .query("SELECT * FROM combo WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(combos)
    }

    /// Find combo by id ("combo:xxx")
    pub async fn find_combo(&self, id: &str) -> RepoResult<Option<Combo>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let combo: Option<Combo> = self.base.db().select(thing).await?;
        Ok(combo)
    }

    /// Create a combo
    pub async fn create_combo(&self, data: ComboCreate) -> RepoResult<Combo> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("Price must be non-negative".to_string()));
        }
        let combo = Combo {
            id: None,
            name: data.name,
            price: data.price,
            is_active: true,
        };
        let created: Option<Combo> = self.base.db().create(COMBO_TABLE).content(combo).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create combo".to_string()))
    }

    /// Update a combo price
    pub async fn update_combo_price(&self, id: &str, price: f64) -> RepoResult<Combo> {
        if price < 0.0 {
            return Err(RepoError::Validation("Price must be non-negative".to_string()));
        }
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET price = $price")
            .bind(("thing", thing))
            .bind(("price", price))
            .await?;
        self.find_combo(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Combo {} not found", id)))
    }
}
