//! Table-order status machine vocabulary and request payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Table-order lifecycle status
///
/// ```text
/// PENDING ──▶ CONFIRMED ──▶ PREPARING ──▶ READY_TO_SERVE ──▶ SERVED ──▶ COMPLETED
///    └──────────┴──────────────┴───────────────┴───────────────┴──▶ CANCELLED
/// ```
///
/// Kitchen progress (PREPARING, READY_TO_SERVE) belongs to the chef role;
/// everything else to the servant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableOrderStatus {
    Pending,
    Confirmed,
    Preparing,
    ReadyToServe,
    Served,
    Completed,
    Cancelled,
}

impl TableOrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TableOrderStatus::Completed | TableOrderStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableOrderStatus::Pending => "PENDING",
            TableOrderStatus::Confirmed => "CONFIRMED",
            TableOrderStatus::Preparing => "PREPARING",
            TableOrderStatus::ReadyToServe => "READY_TO_SERVE",
            TableOrderStatus::Served => "SERVED",
            TableOrderStatus::Completed => "COMPLETED",
            TableOrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for TableOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment side channel - independent of the main status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Success,
}

/// One order line as submitted by the servant (price is looked up server-side)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    /// Catalog item id ("food_item:xxx" or "combo:xxx")
    #[validate(length(min = 1))]
    pub item: String,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i32,
}

/// Create table-order payload (servant, customer already seated)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTableOrderRequest {
    /// Target table id ("dining_table:xxx")
    #[validate(length(min = 1))]
    pub table_id: String,
    /// Originating reservation code; must resolve to an arrived booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_code: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub food_lines: Vec<OrderLineInput>,
    #[validate(nested)]
    #[serde(default)]
    pub combo_lines: Vec<OrderLineInput>,
}

/// Replace order lines payload (servant, before the kitchen picks it up)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrderLinesRequest {
    #[validate(nested)]
    #[serde(default)]
    pub food_lines: Vec<OrderLineInput>,
    #[validate(nested)]
    #[serde(default)]
    pub combo_lines: Vec<OrderLineInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_terminal_states() {
        assert!(TableOrderStatus::Completed.is_terminal());
        assert!(TableOrderStatus::Cancelled.is_terminal());
        for s in [
            TableOrderStatus::Pending,
            TableOrderStatus::Confirmed,
            TableOrderStatus::Preparing,
            TableOrderStatus::ReadyToServe,
            TableOrderStatus::Served,
        ] {
            assert!(!s.is_terminal());
        }
    }

    #[test]
    fn test_line_input_rejects_non_positive_quantity() {
        let line = OrderLineInput {
            item: "food_item:pho".to_string(),
            quantity: 0,
        };
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_status_serde_screaming_snake() {
        let json = serde_json::to_string(&TableOrderStatus::ReadyToServe).unwrap();
        assert_eq!(json, "\"READY_TO_SERVE\"");
    }
}
