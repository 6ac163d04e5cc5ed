//! Availability API Handlers
//!
//! 日期/时间在 handler 层转换为业务时区的 Unix millis。

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::booking::availability::AvailabilityResponse;
use crate::core::ServerState;
use crate::utils::{AppResult, time};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Requested date (YYYY-MM-DD)
    pub date: String,
    /// Requested start time (HH:MM)
    pub time: String,
    /// Explicit window end (HH:MM); defaults to start + service duration
    pub end_time: Option<String>,
    pub party_size: i32,
}

/// GET /api/availability - 查询时间窗口内的空桌
pub async fn free_tables(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let tz = state.config.tz();
    let date = time::parse_date(&query.date)?;
    let start = time::date_time_to_millis(date, time::parse_time(&query.time)?, tz);
    let end = match query.end_time {
        Some(ref t) => Some(time::date_time_to_millis(date, time::parse_time(t)?, tz)),
        None => None,
    };

    let response = state
        .availability
        .free_tables(start, end, query.party_size)
        .await?;
    Ok(Json(response))
}
