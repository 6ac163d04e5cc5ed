//! Actor middleware
//!
//! 从受信任的 `x-actor-*` 头提取操作者并注入请求扩展；
//! 角色守卫按路由分组应用。

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use shared::types::{Actor, Role};
use tracing::warn;

use crate::utils::AppError;

/// 操作者上下文中间件
///
/// 从 `x-actor-id` / `x-actor-name` / `x-actor-role` 头构造 [`Actor`]
/// 并注入请求扩展 (`req.extensions_mut().insert(actor)`)。
///
/// # 跳过的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/health`
///
/// # 错误
///
/// 缺少或无法解析的头返回 401。
pub async fn actor_context(mut req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 健康检查无需身份
    if path == "/api/health" {
        return Ok(next.run(req).await);
    }

    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let Some(id) = header("x-actor-id") else {
        warn!(uri = %req.uri(), "Missing x-actor-id header");
        return Err(AppError::unauthorized());
    };
    let Some(role) = header("x-actor-role").and_then(|r| r.parse::<Role>().ok()) else {
        warn!(uri = %req.uri(), actor = %id, "Missing or invalid x-actor-role header");
        return Err(AppError::unauthorized());
    };
    let name = header("x-actor-name").unwrap_or_else(|| id.clone());

    req.extensions_mut().insert(Actor::new(id, name, role));
    Ok(next.run(req).await)
}

/// 角色守卫中间件
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/reservations/{id}/confirm", post(handler::confirm))
///     .layer(middleware::from_fn(require_roles(&[Role::Servant])));
/// ```
///
/// # 错误
///
/// 角色不在允许集合内返回 403。
pub fn require_roles(
    roles: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let actor = req
                .extensions()
                .get::<Actor>()
                .ok_or(AppError::unauthorized())?;

            if !roles.contains(&actor.role) {
                warn!(
                    actor = %actor.id,
                    role = %actor.role,
                    required = ?roles,
                    "Role not permitted"
                );
                return Err(AppError::forbidden(format!(
                    "Role {} is not permitted here",
                    actor.role
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
