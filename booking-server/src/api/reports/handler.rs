//! Reports API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::reports::{ReportSummary, RevenuePoint, TopItem, TopTable};
use crate::utils::{AppResult, time};

const DEFAULT_TOP_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Range start (YYYY-MM-DD, inclusive)
    pub from: String,
    /// Range end (YYYY-MM-DD, exclusive)
    pub to: String,
    pub limit: Option<usize>,
}

impl RangeQuery {
    fn bounds(&self, tz: chrono_tz::Tz) -> AppResult<(i64, i64)> {
        let from = time::day_start_millis(time::parse_date(&self.from)?, tz);
        let to = time::day_end_millis(time::parse_date(&self.to)?, tz);
        Ok((from, to))
    }
}

/// GET /api/reports/summary - 状态计数与营收汇总
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<ReportSummary>> {
    let (from, to) = query.bounds(state.config.tz())?;
    let summary = state.reports.summary(from, to).await?;
    Ok(Json(summary))
}

/// GET /api/reports/revenue - 按营业日营收
pub async fn revenue(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<RevenuePoint>>> {
    let (from, to) = query.bounds(state.config.tz())?;
    let points = state.reports.revenue_by_day(from, to).await?;
    Ok(Json(points))
}

/// GET /api/reports/top-items - 销量排行
pub async fn top_items(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<TopItem>>> {
    let (from, to) = query.bounds(state.config.tz())?;
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let items = state.reports.top_items(from, to, limit).await?;
    Ok(Json(items))
}

/// GET /api/reports/top-tables - 桌台预订排行
pub async fn top_tables(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<TopTable>>> {
    let (from, to) = query.bounds(state.config.tz())?;
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let tables = state.reports.top_tables(from, to, limit).await?;
    Ok(Json(tables))
}
