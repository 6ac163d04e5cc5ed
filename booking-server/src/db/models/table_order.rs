//! Table Order Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{PaymentStatus, TableOrderStatus};
use surrealdb::RecordId;

/// One priced order line - unit price snapshotted at order time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Catalog item key ("food_item:xxx" or "combo:xxx")
    pub item: String,
    /// Item name snapshot (for receipts/statistics)
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub line_total: f64,
}

/// Table order entity (桌台订单)
///
/// Financial fields (lines, total) freeze once `payment_status` is SUCCESS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOrder {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// "dining_table:xxx"
    pub table_id: String,
    /// Originating "reservation:xxx", if seated through a booking
    pub reservation: Option<String>,
    pub food_lines: Vec<OrderLine>,
    pub combo_lines: Vec<OrderLine>,
    pub status: TableOrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Sum of line totals at order time
    pub total: f64,
    /// Operator who created the order (audit snapshot)
    pub created_by: String,
    pub created_by_name: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub paid_at: Option<i64>,
    pub completed_at: Option<i64>,
}

impl TableOrder {
    /// "table_order:xxx" key for cross-entity references
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Success
    }
}
