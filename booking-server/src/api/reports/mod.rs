//! Reports API 模块

mod handler;

use axum::{Router, middleware, routing::get};
use shared::types::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

const STAFF: &[Role] = &[Role::Servant, Role::Admin];

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/revenue", get(handler::revenue))
        .route("/top-items", get(handler::top_items))
        .route("/top-tables", get(handler::top_tables))
        .layer(middleware::from_fn(require_roles(STAFF)))
}
