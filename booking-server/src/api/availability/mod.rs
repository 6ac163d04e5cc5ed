//! Availability API 模块

mod handler;

use axum::{Router, middleware, routing::get};
use shared::types::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

const ANY_ROLE: &[Role] = &[Role::Customer, Role::Servant, Role::Chef, Role::Admin];

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/availability", get(handler::free_tables))
        .layer(middleware::from_fn(require_roles(ANY_ROLE)))
}
