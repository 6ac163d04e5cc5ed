//! Reservation status machine vocabulary and request payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reservation lifecycle status
///
/// ```text
/// PENDING ──▶ CONFIRMED ──▶ COMPLETED
///    │            ├──▶ CANCELLED
///    └──▶ CANCELLED
///                 └──▶ NO_SHOW
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// No further transition is defined from these states
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed
                | ReservationStatus::Cancelled
                | ReservationStatus::NoShow
        )
    }

    /// Whether a reservation in this status commits its tables for the window.
    ///
    /// Cancelled and no-show bookings release the table; everything else
    /// (including completed, historically) keeps the window committed.
    pub fn blocks_table(&self) -> bool {
        !matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::NoShow
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::NoShow => "NO_SHOW",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create reservation payload (customer or servant on a customer's behalf)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReservationRequest {
    /// Requested table ids ("dining_table:xxx"), one or more
    #[validate(length(min = 1, message = "at least one table is required"))]
    pub tables: Vec<String>,
    /// Window start (Unix millis)
    pub start_at: i64,
    /// Explicit window end; derived from the service duration when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<i64>,
    #[validate(range(min = 1, message = "party size must be positive"))]
    pub party_size: i32,
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    #[validate(length(min = 3, max = 32))]
    pub phone: String,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Edit reservation payload (servant, while PENDING or CONFIRMED)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateReservationRequest {
    /// Replacement table set (None = keep current)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<i64>,
    #[validate(range(min = 1, message = "party size must be positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(!ReservationStatus::Confirmed.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(ReservationStatus::NoShow.is_terminal());
    }

    #[test]
    fn test_blocking_states() {
        assert!(ReservationStatus::Pending.blocks_table());
        assert!(ReservationStatus::Confirmed.blocks_table());
        assert!(ReservationStatus::Completed.blocks_table());
        assert!(!ReservationStatus::Cancelled.blocks_table());
        assert!(!ReservationStatus::NoShow.blocks_table());
    }

    #[test]
    fn test_status_serde_screaming_snake() {
        let json = serde_json::to_string(&ReservationStatus::NoShow).unwrap();
        assert_eq!(json, "\"NO_SHOW\"");
        let back: ReservationStatus = serde_json::from_str("\"NO_SHOW\"").unwrap();
        assert_eq!(back, ReservationStatus::NoShow);
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreateReservationRequest {
            tables: vec![],
            start_at: 0,
            end_at: None,
            party_size: 0,
            customer_name: "Ana".to_string(),
            phone: "600123123".to_string(),
            email: None,
            note: None,
        };
        assert!(validator::Validate::validate(&req).is_err());
    }
}
