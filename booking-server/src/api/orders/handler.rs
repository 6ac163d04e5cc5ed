//! Table Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{CreateTableOrderRequest, TableOrderStatus, UpdateOrderLinesRequest};
use validator::Validate;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::models::TableOrder;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by table ("dining_table:xxx")
    pub table: Option<String>,
    /// Filter by status (kitchen worklist uses CONFIRMED)
    pub status: Option<String>,
}

fn parse_status(s: &str) -> AppResult<TableOrderStatus> {
    serde_json::from_value(serde_json::Value::String(s.to_uppercase()))
        .map_err(|_| AppError::validation(format!("Unknown status: {}", s)))
}

/// POST /api/orders - 建单 (顾客已就座)
pub async fn create(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<CreateTableOrderRequest>,
) -> AppResult<Json<TableOrder>> {
    payload.validate()?;
    let order = state.orders.create(&actor, payload).await?;
    Ok(Json(order))
}

/// GET /api/orders - 按桌台或状态查询
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TableOrder>>> {
    let orders = match (&query.table, &query.status) {
        (Some(table), _) => state.orders.list_by_table(table).await?,
        (None, Some(status)) => state.orders.list_by_status(parse_status(status)?).await?,
        (None, None) => {
            return Err(AppError::validation(
                "Either table or status filter is required",
            ));
        }
    };
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.get(&id).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/lines - 改单并重新计价 (付款前)
pub async fn update_lines(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderLinesRequest>,
) -> AppResult<Json<TableOrder>> {
    payload.validate()?;
    let order = state.orders.update_lines(&actor, &id, payload).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/confirm - 确认下厨
pub async fn confirm(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.confirm(&actor, &id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/claim - 厨师接单
pub async fn claim(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.claim(&actor, &id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/ready - 出餐
pub async fn ready(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.ready(&actor, &id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/serve - 上菜
pub async fn serve(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.serve(&actor, &id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/pay - 收款 (侧信道，冻结金额字段)
pub async fn pay(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.pay(&actor, &id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/complete - 结单 (须已付款)
pub async fn complete(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.complete(&actor, &id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/cancel - 取消 (任意非终态)
pub async fn cancel(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TableOrder>> {
    let order = state.orders.cancel(&actor, &id).await?;
    Ok(Json(order))
}
