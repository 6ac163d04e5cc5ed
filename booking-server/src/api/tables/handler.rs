//! Dining Table API Handlers
//!
//! 桌台是被动引用集：占用状态由预订/订单推导，这里只有简单 CRUD。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::utils::{AppError, AppResult};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.tables.find_all().await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let table = state
        .tables
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    if payload.capacity.is_some_and(|c| c <= 0) {
        return Err(AppError::validation("Capacity must be positive"));
    }
    let table = state.tables.create(payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if payload.capacity.is_some_and(|c| c <= 0) {
        return Err(AppError::validation("Capacity must be positive"));
    }
    let table = state.tables.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - 停用桌台 (软删除，历史预订仍引用)
pub async fn disable(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = state.tables.disable(&id).await?;
    Ok(Json(result))
}
