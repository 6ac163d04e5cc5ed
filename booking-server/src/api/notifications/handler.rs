//! Notification API Handlers
//!
//! 通知按角色分发；list 直接用当前操作者的角色作为范围。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::models::Notification;
use crate::utils::AppResult;

/// GET /api/notifications - 当前角色的通知列表
pub async fn list(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.notifier.list(actor.role).await?;
    Ok(Json(notifications))
}

/// POST /api/notifications/:id/read - 标记已读
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let notification = state.notifier.mark_read(&id).await?;
    Ok(Json(notification))
}

/// DELETE /api/notifications/:id - 删除通知
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = state.notifier.delete(&id).await?;
    Ok(Json(result))
}
