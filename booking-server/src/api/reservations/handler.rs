//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{CreateReservationRequest, ReservationStatus, UpdateReservationRequest};
use shared::util::now_millis;
use validator::Validate;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::models::Reservation;
use crate::utils::{AppError, AppResult, time};

const DAY_MS: i64 = 24 * 3_600_000;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Single business day (YYYY-MM-DD)
    pub date: Option<String>,
    /// Explicit range start (YYYY-MM-DD, inclusive)
    pub from: Option<String>,
    /// Explicit range end (YYYY-MM-DD, exclusive)
    pub to: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub servant: String,
}

fn parse_status(s: &str) -> AppResult<ReservationStatus> {
    serde_json::from_value(serde_json::Value::String(s.to_uppercase()))
        .map_err(|_| AppError::validation(format!("Unknown status: {}", s)))
}

/// POST /api/reservations - 创建预订 (顾客或服务员代客)
pub async fn create(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<Json<Reservation>> {
    payload.validate()?;
    let reservation = state.reservations.create(&actor, payload).await?;
    Ok(Json(reservation))
}

/// GET /api/reservations - 按日期范围/状态查询
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    if let Some(ref status) = query.status {
        let status = parse_status(status)?;
        let reservations = state.reservations.list_by_status(status).await?;
        return Ok(Json(reservations));
    }

    let tz = state.config.tz();
    let (from, to) = match (&query.date, &query.from, &query.to) {
        (Some(date), _, _) => {
            let date = time::parse_date(date)?;
            (time::day_start_millis(date, tz), time::day_end_millis(date, tz))
        }
        (None, Some(from), Some(to)) => (
            time::day_start_millis(time::parse_date(from)?, tz),
            time::day_end_millis(time::parse_date(to)?, tz),
        ),
        // default: the coming 24 hours
        _ => (now_millis(), now_millis() + DAY_MS),
    };
    let reservations = state.reservations.list_range(from, to).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.get(&id).await?;
    Ok(Json(reservation))
}

/// GET /api/reservations/code/:code - 按预订码查询
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.find_by_code(&code).await?;
    Ok(Json(reservation))
}

/// PUT /api/reservations/:id - 编辑预订 (重跑冲突检查)
pub async fn edit(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReservationRequest>,
) -> AppResult<Json<Reservation>> {
    payload.validate()?;
    let reservation = state.reservations.edit(&actor, &id, payload).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/:id/confirm - 接受预订
pub async fn confirm(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.confirm(&actor, &id).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/:id/reject - 拒绝预订
pub async fn reject(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.reject(&actor, &id).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/:id/cancel - 取消已确认预订
pub async fn cancel(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.cancel(&actor, &id).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/:id/complete - 窗口结束后关闭预订
pub async fn complete(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.complete(&actor, &id).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/:id/no-show - 标记未到店
pub async fn no_show(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.no_show(&actor, &id).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/:id/assign - 指派服务员
pub async fn assign(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .reservations
        .assign_servant(&actor, &id, payload.servant)
        .await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/arrive/:code - 到店登记 (授权开单，不改状态)
pub async fn arrive(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.mark_arrived(&code).await?;
    Ok(Json(reservation))
}

/// DELETE /api/reservations/:id - 删除 (仅 PENDING)
pub async fn remove(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.reservations.delete(&actor, &id).await?;
    Ok(Json(true))
}
