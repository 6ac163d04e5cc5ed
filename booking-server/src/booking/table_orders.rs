//! Table-Order State Machine
//!
//! ```text
//! PENDING ──confirm──▶ CONFIRMED ──claim──▶ PREPARING ──ready──▶ READY_TO_SERVE
//!                                                                      │
//!            COMPLETED ◀──complete── SERVED ◀─────────serve────────────┘
//! ```
//!
//! Any non-terminal state may be cancelled. Kitchen steps (claim, ready)
//! belong to the chef role; the rest to the servant. Payment is a side
//! channel: once SUCCESS, the financial fields are frozen.

use std::sync::Arc;

use shared::models::{
    CreateTableOrderRequest, NotificationKind, OrderLineInput, PaymentStatus, ReservationStatus,
    TableOrderStatus, UpdateOrderLinesRequest,
};
use shared::types::{Actor, Role};
use shared::util::now_millis;
use tracing::info;

use super::{BookingError, BookingResult};
use crate::db::models::{OrderLine, TableOrder};
use crate::db::repository::{DiningTableRepository, ReservationRepository, TableOrderRepository};
use crate::notify::NotificationService;
use crate::services::PriceSource;

pub struct TableOrderService {
    repo: TableOrderRepository,
    tables: DiningTableRepository,
    reservations: ReservationRepository,
    catalog: Arc<dyn PriceSource>,
    notifier: Arc<NotificationService>,
}

impl TableOrderService {
    pub fn new(
        repo: TableOrderRepository,
        tables: DiningTableRepository,
        reservations: ReservationRepository,
        catalog: Arc<dyn PriceSource>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        Self {
            repo,
            tables,
            reservations,
            catalog,
            notifier,
        }
    }

    // ========== Queries ==========

    pub async fn get(&self, id: &str) -> BookingResult<TableOrder> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Table order {} not found", id)))
    }

    pub async fn list_by_table(&self, table: &str) -> BookingResult<Vec<TableOrder>> {
        Ok(self.repo.find_by_table(table).await?)
    }

    /// Kitchen worklist: orders in one status, oldest first
    pub async fn list_by_status(
        &self,
        status: TableOrderStatus,
    ) -> BookingResult<Vec<TableOrder>> {
        Ok(self.repo.find_by_status(status).await?)
    }

    // ========== Create ==========

    /// Attach a food/combo order to a table (servant, customer seated).
    ///
    /// Prices are snapshotted from the catalog at this instant; later
    /// catalog changes do not affect the order.
    pub async fn create(
        &self,
        actor: &Actor,
        req: CreateTableOrderRequest,
    ) -> BookingResult<TableOrder> {
        let table = self
            .tables
            .find_by_id(&req.table_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| {
                BookingError::InconsistentReference(format!(
                    "Table {} does not exist",
                    req.table_id
                ))
            })?;

        // A reservation reference must point at an arrived, confirmed booking
        let reservation = match req.reservation_code {
            Some(ref code) => {
                let r = self
                    .reservations
                    .find_by_code(code)
                    .await?
                    .ok_or_else(|| {
                        BookingError::NotFound(format!("No reservation for code {}", code))
                    })?;
                if r.status != ReservationStatus::Confirmed || r.arrived_at.is_none() {
                    return Err(BookingError::Validation(format!(
                        "reservation {} has not been marked arrived",
                        code
                    )));
                }
                if !r.tables.contains(&req.table_id) {
                    return Err(BookingError::Validation(format!(
                        "reservation {} does not cover table {}",
                        code, table.name
                    )));
                }
                Some(r.key())
            }
            None => None,
        };

        if req.food_lines.is_empty() && req.combo_lines.is_empty() {
            return Err(BookingError::Validation(
                "order must contain at least one line".to_string(),
            ));
        }
        let (food_lines, combo_lines, total) =
            self.price_all(&req.food_lines, &req.combo_lines).await?;

        let now = now_millis();
        let created = self
            .repo
            .create(TableOrder {
                id: None,
                table_id: req.table_id,
                reservation,
                food_lines,
                combo_lines,
                status: TableOrderStatus::Pending,
                payment_status: PaymentStatus::Unpaid,
                total,
                created_by: actor.id.clone(),
                created_by_name: actor.name.clone(),
                created_at: now,
                updated_at: now,
                paid_at: None,
                completed_at: None,
            })
            .await?;

        info!(
            order = %created.key(),
            table = %table.name,
            total = created.total,
            operator = %actor.id,
            "Table order created"
        );
        self.notifier
            .emit(
                NotificationKind::TableOrderCreated,
                Role::Chef,
                "New table order",
                format!("Table {}: new order, total {:.0}", table.name, created.total),
                Some(created.key()),
            )
            .await;
        Ok(created)
    }

    // ========== Transitions ==========

    /// Servant confirms the order and sends it to the kitchen
    pub async fn confirm(&self, actor: &Actor, id: &str) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        guard(&existing, TableOrderStatus::Pending, "confirm")?;
        let updated = self
            .repo
            .update_status(id, TableOrderStatus::Confirmed, None, now_millis())
            .await?;
        info!(order = %id, operator = %actor.id, "Table order confirmed");
        self.notifier
            .emit(
                NotificationKind::TableOrderConfirmed,
                Role::Chef,
                "Order confirmed",
                format!("Order for table {} is ready to prepare", updated.table_id),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    /// Chef picks the order off the worklist
    pub async fn claim(&self, actor: &Actor, id: &str) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        guard(&existing, TableOrderStatus::Confirmed, "start preparing")?;
        let updated = self
            .repo
            .update_status(id, TableOrderStatus::Preparing, None, now_millis())
            .await?;
        info!(order = %id, operator = %actor.id, "Preparation started");
        Ok(updated)
    }

    /// Chef finishes preparation
    pub async fn ready(&self, actor: &Actor, id: &str) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        guard(&existing, TableOrderStatus::Preparing, "mark ready")?;
        let updated = self
            .repo
            .update_status(id, TableOrderStatus::ReadyToServe, None, now_millis())
            .await?;
        info!(order = %id, operator = %actor.id, "Order ready to serve");
        self.notifier
            .emit(
                NotificationKind::TableOrderReady,
                Role::Servant,
                "Order ready",
                format!("Order for table {} is ready to serve", updated.table_id),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    /// Servant delivers the dishes
    pub async fn serve(&self, actor: &Actor, id: &str) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        guard(&existing, TableOrderStatus::ReadyToServe, "serve")?;
        let updated = self
            .repo
            .update_status(id, TableOrderStatus::Served, None, now_millis())
            .await?;
        info!(order = %id, operator = %actor.id, "Order served");
        Ok(updated)
    }

    /// Close out a served, paid order
    pub async fn complete(&self, actor: &Actor, id: &str) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        guard(&existing, TableOrderStatus::Served, "complete")?;
        if !existing.is_paid() {
            return Err(BookingError::InvalidTransition(
                "cannot complete an unpaid order".to_string(),
            ));
        }
        let now = now_millis();
        let updated = self
            .repo
            .update_status(id, TableOrderStatus::Completed, Some(now), now)
            .await?;
        info!(order = %id, operator = %actor.id, total = updated.total, "Table order completed");
        self.notifier
            .emit(
                NotificationKind::TableOrderCompleted,
                Role::Servant,
                "Order completed",
                format!("Order for table {} completed, total {:.0}", updated.table_id, updated.total),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    /// Payment side channel; independent of the main status enum
    pub async fn pay(&self, actor: &Actor, id: &str) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        if existing.status == TableOrderStatus::Cancelled {
            return Err(BookingError::InvalidTransition(
                "cannot pay a cancelled order".to_string(),
            ));
        }
        if existing.is_paid() {
            return Err(BookingError::InvalidTransition(
                "order is already paid".to_string(),
            ));
        }
        let now = now_millis();
        let updated = self
            .repo
            .update_payment(id, PaymentStatus::Success, Some(now), now)
            .await?;
        info!(order = %id, operator = %actor.id, total = updated.total, "Payment recorded");
        Ok(updated)
    }

    /// Replace the lines and re-price (servant, before the kitchen starts)
    pub async fn update_lines(
        &self,
        actor: &Actor,
        id: &str,
        req: UpdateOrderLinesRequest,
    ) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        if existing.is_paid() {
            return Err(BookingError::InvalidTransition(
                "financial fields are frozen after payment".to_string(),
            ));
        }
        match existing.status {
            TableOrderStatus::Pending | TableOrderStatus::Confirmed => {}
            status => {
                return Err(BookingError::InvalidTransition(format!(
                    "cannot change lines of an order in status {}",
                    status
                )));
            }
        }
        if req.food_lines.is_empty() && req.combo_lines.is_empty() {
            return Err(BookingError::Validation(
                "order must contain at least one line".to_string(),
            ));
        }
        let (food_lines, combo_lines, total) =
            self.price_all(&req.food_lines, &req.combo_lines).await?;
        let updated = self
            .repo
            .update_lines(id, food_lines, combo_lines, total, now_millis())
            .await?;
        info!(order = %id, operator = %actor.id, total = updated.total, "Order lines replaced");
        Ok(updated)
    }

    /// Cancel from any non-terminal state
    pub async fn cancel(&self, actor: &Actor, id: &str) -> BookingResult<TableOrder> {
        let existing = self.get(id).await?;
        if existing.status.is_terminal() {
            return Err(BookingError::InvalidTransition(format!(
                "cannot cancel order in status {}",
                existing.status
            )));
        }
        let updated = self
            .repo
            .update_status(id, TableOrderStatus::Cancelled, None, now_millis())
            .await?;
        info!(order = %id, operator = %actor.id, "Table order cancelled");
        self.notifier
            .emit(
                NotificationKind::TableOrderCancelled,
                Role::Chef,
                "Order cancelled",
                format!("Order for table {} was cancelled", updated.table_id),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    // ========== Internals ==========

    async fn price_all(
        &self,
        food: &[OrderLineInput],
        combos: &[OrderLineInput],
    ) -> BookingResult<(Vec<OrderLine>, Vec<OrderLine>, f64)> {
        let food_lines = self.price_lines(food, false).await?;
        let combo_lines = self.price_lines(combos, true).await?;
        let total = food_lines
            .iter()
            .chain(combo_lines.iter())
            .map(|l| l.line_total)
            .sum();
        Ok((food_lines, combo_lines, total))
    }

    async fn price_lines(
        &self,
        inputs: &[OrderLineInput],
        is_combo: bool,
    ) -> BookingResult<Vec<OrderLine>> {
        let mut lines = Vec::with_capacity(inputs.len());
        for input in inputs {
            if input.quantity <= 0 {
                return Err(BookingError::Validation(
                    "quantity must be positive".to_string(),
                ));
            }
            let priced = if is_combo {
                self.catalog.combo(&input.item).await?
            } else {
                self.catalog.food(&input.item).await?
            };
            let line_total = priced.price * input.quantity as f64;
            lines.push(OrderLine {
                item: input.item.clone(),
                name: priced.name,
                unit_price: priced.price,
                quantity: input.quantity,
                line_total,
            });
        }
        Ok(lines)
    }
}

/// Single-predecessor status guard
fn guard(order: &TableOrder, expected: TableOrderStatus, action: &str) -> BookingResult<()> {
    if order.status != expected {
        return Err(BookingError::InvalidTransition(format!(
            "cannot {} order in status {}",
            action, order.status
        )));
    }
    Ok(())
}
