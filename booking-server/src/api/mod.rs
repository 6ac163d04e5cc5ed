//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 桌台管理接口
//! - [`availability`] - 空桌查询接口
//! - [`reservations`] - 预订生命周期接口
//! - [`orders`] - 桌台订单生命周期接口
//! - [`notifications`] - 通知接口
//! - [`reports`] - 报表接口
//! - [`catalog`] - 菜品/套餐接口 (协作子系统)

pub mod availability;
pub mod catalog;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod reports;
pub mod reservations;
pub mod tables;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::actor_context;
use crate::core::ServerState;

/// Assemble the full API router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(availability::router())
        .merge(reservations::router())
        .merge(orders::router())
        .merge(notifications::router())
        .merge(reports::router())
        .merge(catalog::router())
        .layer(middleware::from_fn(actor_context))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

// Re-export common types for handlers
pub use crate::utils::{AppResult, ok};
