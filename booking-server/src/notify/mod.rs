//! Notification Dispatcher
//!
//! Fire-and-forget relative to the state transitions that produce events:
//! persistence failures are logged and swallowed, never propagated, so a
//! notification can never roll back the transition. Live subscribers get
//! the record over a broadcast channel (lagging receivers are dropped by
//! the channel, not by us).

use shared::models::NotificationKind;
use shared::types::Role;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;
use tracing::warn;

use crate::booking::BookingResult;
use crate::db::models::Notification;
use crate::db::repository::NotificationRepository;

/// Broadcast channel capacity (events are small; readers are few)
const NOTIFY_CHANNEL_CAPACITY: usize = 1024;

pub struct NotificationService {
    repo: NotificationRepository,
    event_tx: broadcast::Sender<Notification>,
}

impl NotificationService {
    pub fn new(db: Surreal<Db>) -> Self {
        let (event_tx, _) = broadcast::channel(NOTIFY_CHANNEL_CAPACITY);
        Self {
            repo: NotificationRepository::new(db),
            event_tx,
        }
    }

    /// Emit a lifecycle event to a role scope - best-effort
    pub async fn emit(
        &self,
        kind: NotificationKind,
        scope: Role,
        title: &str,
        message: String,
        related: Option<String>,
    ) {
        let notification = Notification {
            id: None,
            kind,
            title: title.to_string(),
            message,
            scope,
            is_read: false,
            related,
            created_at: now_millis(),
        };
        match self.repo.create(notification).await {
            Ok(saved) => {
                // No receivers is fine
                let _ = self.event_tx.send(saved);
            }
            Err(e) => {
                warn!(kind = %kind, scope = %scope, error = %e, "Failed to persist notification");
            }
        }
    }

    /// Subscribe to live notifications
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.event_tx.subscribe()
    }

    /// All notifications for a role scope, newest first
    pub async fn list(&self, scope: Role) -> BookingResult<Vec<Notification>> {
        Ok(self.repo.find_by_scope(scope).await?)
    }

    /// Flip the read flag
    pub async fn mark_read(&self, id: &str) -> BookingResult<Notification> {
        Ok(self.repo.mark_read(id).await?)
    }

    /// Delete on explicit user action
    pub async fn delete(&self, id: &str) -> BookingResult<bool> {
        Ok(self.repo.delete(id).await?)
    }
}
