//! Reservation Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::ReservationStatus;
use surrealdb::RecordId;

/// Reservation entity (预订)
///
/// `tables` holds one or more "dining_table:xxx" keys. The overlap
/// invariant is enforced by the reservation engine's write path, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Human-readable code, e.g. "BK-7GXK2M" (unique)
    pub code: String,
    pub tables: Vec<String>,
    /// Window start, Unix millis ([start_at, end_at))
    pub start_at: i64,
    pub end_at: i64,
    pub party_size: i32,
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub note: Option<String>,
    pub status: ReservationStatus,
    /// Assigned servant (actor id), if any
    pub servant: Option<String>,
    /// Set by mark-arrived; authorizes table-order creation
    pub arrived_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    /// "reservation:xxx" key for cross-entity references
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Whether this reservation shares at least one table with `keys`
    pub fn uses_any_table(&self, keys: &[String]) -> bool {
        self.tables.iter().any(|t| keys.contains(t))
    }
}
