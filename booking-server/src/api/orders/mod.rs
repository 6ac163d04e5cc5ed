//! Table Order API 模块

mod handler;

use axum::{Router, middleware, routing::{get, post, put}};
use shared::types::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

const READ: &[Role] = &[Role::Servant, Role::Chef, Role::Admin];
const SERVANT: &[Role] = &[Role::Servant];
const CHEF: &[Role] = &[Role::Chef];

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_roles(READ)));

    // 服务员：建单、改单、上菜、收款、结单、取消
    let servant_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/lines", put(handler::update_lines))
        .route("/{id}/confirm", post(handler::confirm))
        .route("/{id}/serve", post(handler::serve))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/pay", post(handler::pay))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn(require_roles(SERVANT)));

    // 厨师：接单、出餐
    let chef_routes = Router::new()
        .route("/{id}/claim", post(handler::claim))
        .route("/{id}/ready", post(handler::ready))
        .layer(middleware::from_fn(require_roles(CHEF)));

    read_routes.merge(servant_routes).merge(chef_routes)
}
