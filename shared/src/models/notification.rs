//! Notification vocabulary - lifecycle events emitted to role scopes

use serde::{Deserialize, Serialize};

/// Notifications are scoped to a role, not an individual
pub use crate::types::Role as RecipientScope;

/// Notification type tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    // Reservation lifecycle
    ReservationCreated,
    ReservationConfirmed,
    ReservationRejected,
    ReservationCompleted,
    ReservationNoShow,
    ReservationDeletedByServant,

    // Table-order lifecycle
    TableOrderCreated,
    TableOrderConfirmed,
    TableOrderReady,
    TableOrderCompleted,
    TableOrderCancelled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ReservationCreated => "RESERVATION_CREATED",
            NotificationKind::ReservationConfirmed => "RESERVATION_CONFIRMED",
            NotificationKind::ReservationRejected => "RESERVATION_REJECTED",
            NotificationKind::ReservationCompleted => "RESERVATION_COMPLETED",
            NotificationKind::ReservationNoShow => "RESERVATION_NO_SHOW",
            NotificationKind::ReservationDeletedByServant => "RESERVATION_DELETED_BY_SERVANT",
            NotificationKind::TableOrderCreated => "TABLE_ORDER_CREATED",
            NotificationKind::TableOrderConfirmed => "TABLE_ORDER_CONFIRMED",
            NotificationKind::TableOrderReady => "TABLE_ORDER_READY",
            NotificationKind::TableOrderCompleted => "TABLE_ORDER_COMPLETED",
            NotificationKind::TableOrderCancelled => "TABLE_ORDER_CANCELLED",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
