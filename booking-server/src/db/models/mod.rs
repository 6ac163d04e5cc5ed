//! Persistence entities (SurrealDB)
//!
//! Cross-entity references are stored as plain "table:id" strings;
//! only the record's own `id` uses the native RecordId type.

pub mod catalog;
pub mod dining_table;
pub mod notification;
pub mod reservation;
pub mod serde_helpers;
pub mod table_order;

pub use catalog::{Combo, ComboCreate, FoodItem, FoodItemCreate, PriceUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use notification::Notification;
pub use reservation::Reservation;
pub use table_order::{OrderLine, TableOrder};
