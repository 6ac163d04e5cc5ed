//! Catalog API Handlers
//!
//! 订单引擎只在建单/改单时读取价格；这里是目录子系统的简单维护面。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Combo, ComboCreate, FoodItem, FoodItemCreate, PriceUpdate};
use crate::utils::AppResult;

/// GET /api/catalog/foods - 菜品列表
pub async fn list_foods(State(state): State<ServerState>) -> AppResult<Json<Vec<FoodItem>>> {
    let foods = state.catalog.repo().find_all_foods().await?;
    Ok(Json(foods))
}

/// POST /api/catalog/foods - 新建菜品
pub async fn create_food(
    State(state): State<ServerState>,
    Json(payload): Json<FoodItemCreate>,
) -> AppResult<Json<FoodItem>> {
    let food = state.catalog.repo().create_food(payload).await?;
    Ok(Json(food))
}

/// PUT /api/catalog/foods/:id/price - 调整菜品价格 (不影响已建订单)
pub async fn update_food_price(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PriceUpdate>,
) -> AppResult<Json<FoodItem>> {
    let food = state
        .catalog
        .repo()
        .update_food_price(&id, payload.price)
        .await?;
    Ok(Json(food))
}

/// GET /api/catalog/combos - 套餐列表
pub async fn list_combos(State(state): State<ServerState>) -> AppResult<Json<Vec<Combo>>> {
    let combos = state.catalog.repo().find_all_combos().await?;
    Ok(Json(combos))
}

/// POST /api/catalog/combos - 新建套餐
pub async fn create_combo(
    State(state): State<ServerState>,
    Json(payload): Json<ComboCreate>,
) -> AppResult<Json<Combo>> {
    let combo = state.catalog.repo().create_combo(payload).await?;
    Ok(Json(combo))
}

/// PUT /api/catalog/combos/:id/price - 调整套餐价格 (不影响已建订单)
pub async fn update_combo_price(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PriceUpdate>,
) -> AppResult<Json<Combo>> {
    let combo = state
        .catalog
        .repo()
        .update_combo_price(&id, payload.price)
        .await?;
    Ok(Json(combo))
}
