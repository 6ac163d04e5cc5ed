//! Notification Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Notification;
use shared::types::Role;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "notification";

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a notification record
    pub async fn create(&self, notification: Notification) -> RepoResult<Notification> {
        let created: Option<Notification> =
            self.base.db().create(TABLE).content(notification).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    /// Find notification by id ("notification:xxx")
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Notification>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let notification: Option<Notification> = self.base.db().select(thing).await?;
        Ok(notification)
    }

    /// All notifications for a role scope, newest first
    pub async fn find_by_scope(&self, scope: Role) -> RepoResult<Vec<Notification>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM notification WHERE scope = $scope ORDER BY created_at DESC")
            .bind(("scope", scope.as_str()))
            .await?;
        let rows: Vec<Notification> = result.take(0)?;
        Ok(rows)
    }

    /// Flip the read flag
    pub async fn mark_read(&self, id: &str) -> RepoResult<Notification> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET is_read = true")
            .bind(("thing", thing))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }

    /// Delete on explicit user action
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
