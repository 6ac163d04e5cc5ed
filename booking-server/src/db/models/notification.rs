//! Notification Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::NotificationKind;
use shared::types::Role;
use surrealdb::RecordId;

/// Notification entity - lifecycle event addressed to a role scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Recipient role scope
    pub scope: Role,
    #[serde(default)]
    pub is_read: bool,
    /// Related entity key ("reservation:xxx" / "table_order:xxx"), if any
    pub related: Option<String>,
    pub created_at: i64,
}
