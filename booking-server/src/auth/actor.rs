//! Actor extractor

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shared::types::Actor;

use crate::utils::AppError;

/// Extracts the [`Actor`] injected by [`super::actor_context`].
///
/// # 示例
///
/// ```ignore
/// async fn handler(CurrentActor(actor): CurrentActor) -> AppResult<Json<()>> {
///     tracing::info!(operator = %actor.id, "handling");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .map(CurrentActor)
            .ok_or(AppError::unauthorized())
    }
}
