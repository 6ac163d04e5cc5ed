//! Reservation API 模块

mod handler;

use axum::{Router, middleware, routing::{get, post, put}};
use shared::types::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

const BOOKING: &[Role] = &[Role::Customer, Role::Servant];
const STAFF: &[Role] = &[Role::Servant, Role::Admin];
const SERVANT: &[Role] = &[Role::Servant];

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    // 创建：顾客本人或服务员代客
    let create_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_roles(BOOKING)));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/code/{code}", get(handler::get_by_code))
        .layer(middleware::from_fn(require_roles(STAFF)));

    // 生命周期转换：仅服务员
    let transition_routes = Router::new()
        .route("/{id}", put(handler::edit).delete(handler::remove))
        .route("/{id}/confirm", post(handler::confirm))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/no-show", post(handler::no_show))
        .route("/{id}/assign", post(handler::assign))
        .route("/arrive/{code}", post(handler::arrive))
        .layer(middleware::from_fn(require_roles(SERVANT)));

    create_routes.merge(read_routes).merge(transition_routes)
}
