//! Dining Table API 模块

mod handler;

use axum::{Router, middleware, routing::get};
use shared::types::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

const ANY_ROLE: &[Role] = &[Role::Customer, Role::Servant, Role::Chef, Role::Admin];
const MANAGE: &[Role] = &[Role::Admin];

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_roles(ANY_ROLE)));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::disable),
        )
        .layer(middleware::from_fn(require_roles(MANAGE)));

    read_routes.merge(manage_routes)
}
