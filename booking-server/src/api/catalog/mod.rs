//! Catalog API 模块 (协作子系统的简单 CRUD 面)

mod handler;

use axum::{Router, middleware, routing::{get, post, put}};
use shared::types::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

const ANY_ROLE: &[Role] = &[Role::Customer, Role::Servant, Role::Chef, Role::Admin];
const MANAGE: &[Role] = &[Role::Admin];

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalog", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/foods", get(handler::list_foods))
        .route("/combos", get(handler::list_combos))
        .layer(middleware::from_fn(require_roles(ANY_ROLE)));

    let manage_routes = Router::new()
        .route("/foods", post(handler::create_food))
        .route("/foods/{id}/price", put(handler::update_food_price))
        .route("/combos", post(handler::create_combo))
        .route("/combos/{id}/price", put(handler::update_combo_price))
        .layer(middleware::from_fn(require_roles(MANAGE)));

    read_routes.merge(manage_routes)
}
