//! Table Order Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{OrderLine, TableOrder};
use shared::models::{PaymentStatus, TableOrderStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "table_order";

#[derive(Clone)]
pub struct TableOrderRepository {
    base: BaseRepository,
}

impl TableOrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id ("table_order:xxx")
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TableOrder>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<TableOrder> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// All orders for a table, newest first
    pub async fn find_by_table(&self, table: &str) -> RepoResult<Vec<TableOrder>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM table_order WHERE table_id = $table ORDER BY created_at DESC")
            .bind(("table", table.to_string()))
            .await?;
        let rows: Vec<TableOrder> = result.take(0)?;
        Ok(rows)
    }

    /// All orders in a given status, oldest first (kitchen worklist order)
    pub async fn find_by_status(&self, status: TableOrderStatus) -> RepoResult<Vec<TableOrder>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM table_order WHERE status = $status ORDER BY created_at")
            .bind(("status", status.as_str()))
            .await?;
        let rows: Vec<TableOrder> = result.take(0)?;
        Ok(rows)
    }

    /// All orders created inside [from, to)
    pub async fn find_in_range(&self, from: i64, to: i64) -> RepoResult<Vec<TableOrder>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM table_order WHERE created_at >= $from AND created_at < $to ORDER BY created_at",
            )
            .bind(("from", from))
            .bind(("to", to))
            .await?;
        let rows: Vec<TableOrder> = result.take(0)?;
        Ok(rows)
    }

    /// Insert a new order
    pub async fn create(&self, order: TableOrder) -> RepoResult<TableOrder> {
        let created: Option<TableOrder> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table order".to_string()))
    }

    /// Set the lifecycle status; stamps completed_at when provided
    pub async fn update_status(
        &self,
        id: &str,
        status: TableOrderStatus,
        completed_at: Option<i64>,
        now: i64,
    ) -> RepoResult<TableOrder> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET status = $status, completed_at = $completed_at, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("status", status.as_str()))
            .bind(("completed_at", completed_at))
            .bind(("now", now))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table order {} not found", id)))
    }

    /// Flip the payment side channel
    pub async fn update_payment(
        &self,
        id: &str,
        payment_status: PaymentStatus,
        paid_at: Option<i64>,
        now: i64,
    ) -> RepoResult<TableOrder> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let status_str = match payment_status {
            PaymentStatus::Unpaid => "UNPAID",
            PaymentStatus::Success => "SUCCESS",
        };
        self.base
            .db()
            .query(
                "UPDATE $thing SET payment_status = $payment_status, paid_at = $paid_at, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("payment_status", status_str))
            .bind(("paid_at", paid_at))
            .bind(("now", now))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table order {} not found", id)))
    }

    /// Replace the order lines (re-priced by the caller)
    pub async fn update_lines(
        &self,
        id: &str,
        food_lines: Vec<OrderLine>,
        combo_lines: Vec<OrderLine>,
        total: f64,
        now: i64,
    ) -> RepoResult<TableOrder> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET food_lines = $food_lines, combo_lines = $combo_lines, \
                 total = $total, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("food_lines", food_lines))
            .bind(("combo_lines", combo_lines))
            .bind(("total", total))
            .bind(("now", now))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table order {} not found", id)))
    }
}
