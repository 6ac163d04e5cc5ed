//! Notification API 模块

mod handler;

use axum::{Router, middleware, routing::{delete, get, post}};
use shared::types::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

const ANY_ROLE: &[Role] = &[Role::Customer, Role::Servant, Role::Chef, Role::Admin];

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/notifications", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}/read", post(handler::mark_read))
        .route("/{id}", delete(handler::remove))
        .layer(middleware::from_fn(require_roles(ANY_ROLE)))
}
