//! Reporting Aggregator
//!
//! Read-only rollups over terminal-state reservations and orders, computed
//! in Rust from plain range fetches. Tolerates partially-populated
//! historical data: missing optional fields render as zero or are omitted.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{ReservationStatus, TableOrderStatus};

use crate::booking::BookingResult;
use crate::db::models::TableOrder;
use crate::db::repository::{ReservationRepository, TableOrderRepository};
use crate::utils::time::millis_to_business_date;

/// Count of records per status value
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Headline rollup for a date range
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub reservations: Vec<StatusCount>,
    pub orders: Vec<StatusCount>,
    /// Revenue over paid orders in the range
    pub revenue: f64,
    pub paid_orders: i64,
    pub average_order_value: f64,
}

/// Revenue rollup for one business day
#[derive(Debug, Clone, Serialize)]
pub struct RevenuePoint {
    pub date: String,
    pub revenue: f64,
    pub orders: i64,
}

/// Item sales rollup (completed orders only)
#[derive(Debug, Clone, Serialize)]
pub struct TopItem {
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Reservation volume per table (completed reservations only)
#[derive(Debug, Clone, Serialize)]
pub struct TopTable {
    pub table_id: String,
    pub reservations: i64,
}

#[derive(Clone)]
pub struct ReportService {
    reservations: ReservationRepository,
    orders: TableOrderRepository,
    tz: Tz,
}

impl ReportService {
    pub fn new(
        reservations: ReservationRepository,
        orders: TableOrderRepository,
        tz: Tz,
    ) -> Self {
        Self {
            reservations,
            orders,
            tz,
        }
    }

    /// Status counts and revenue for [from, to)
    pub async fn summary(&self, from: i64, to: i64) -> BookingResult<ReportSummary> {
        let (reservations, orders) = futures::try_join!(
            async {
                self.reservations
                    .find_in_range(from, to)
                    .await
                    .map_err(crate::booking::BookingError::from)
            },
            async {
                self.orders
                    .find_in_range(from, to)
                    .await
                    .map_err(crate::booking::BookingError::from)
            }
        )?;

        let mut reservation_counts: BTreeMap<&'static str, i64> = BTreeMap::new();
        for r in &reservations {
            *reservation_counts.entry(r.status.as_str()).or_insert(0) += 1;
        }
        let mut order_counts: BTreeMap<&'static str, i64> = BTreeMap::new();
        for o in &orders {
            *order_counts.entry(o.status.as_str()).or_insert(0) += 1;
        }

        let paid: Vec<&TableOrder> = orders.iter().filter(|o| o.is_paid()).collect();
        let revenue: f64 = paid.iter().map(|o| o.total).sum();
        let paid_orders = paid.len() as i64;
        let average_order_value = if paid_orders > 0 {
            revenue / paid_orders as f64
        } else {
            0.0
        };

        Ok(ReportSummary {
            reservations: to_counts(reservation_counts),
            orders: to_counts(order_counts),
            revenue,
            paid_orders,
            average_order_value,
        })
    }

    /// Revenue per business day over paid orders created in [from, to)
    pub async fn revenue_by_day(&self, from: i64, to: i64) -> BookingResult<Vec<RevenuePoint>> {
        let orders = self.orders.find_in_range(from, to).await?;
        let mut days: BTreeMap<String, (f64, i64)> = BTreeMap::new();
        for order in orders.iter().filter(|o| o.is_paid()) {
            let stamp = order.paid_at.unwrap_or(order.created_at);
            let date = millis_to_business_date(stamp, self.tz).to_string();
            let entry = days.entry(date).or_insert((0.0, 0));
            entry.0 += order.total;
            entry.1 += 1;
        }
        Ok(days
            .into_iter()
            .map(|(date, (revenue, orders))| RevenuePoint {
                date,
                revenue,
                orders,
            })
            .collect())
    }

    /// Best-selling items over completed orders in [from, to)
    pub async fn top_items(&self, from: i64, to: i64, limit: usize) -> BookingResult<Vec<TopItem>> {
        let orders = self.orders.find_in_range(from, to).await?;
        let mut items: BTreeMap<String, (i64, f64)> = BTreeMap::new();
        for order in orders
            .iter()
            .filter(|o| o.status == TableOrderStatus::Completed)
        {
            for line in order.food_lines.iter().chain(order.combo_lines.iter()) {
                let entry = items.entry(line.name.clone()).or_insert((0, 0.0));
                entry.0 += line.quantity as i64;
                entry.1 += line.line_total;
            }
        }
        let mut top: Vec<TopItem> = items
            .into_iter()
            .map(|(name, (quantity, revenue))| TopItem {
                name,
                quantity,
                revenue,
            })
            .collect();
        top.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
        top.truncate(limit);
        Ok(top)
    }

    /// Most-booked tables over completed reservations in [from, to)
    pub async fn top_tables(
        &self,
        from: i64,
        to: i64,
        limit: usize,
    ) -> BookingResult<Vec<TopTable>> {
        let reservations = self.reservations.find_in_range(from, to).await?;
        let mut tables: BTreeMap<String, i64> = BTreeMap::new();
        for r in reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Completed)
        {
            for table in &r.tables {
                *tables.entry(table.clone()).or_insert(0) += 1;
            }
        }
        let mut top: Vec<TopTable> = tables
            .into_iter()
            .map(|(table_id, reservations)| TopTable {
                table_id,
                reservations,
            })
            .collect();
        top.sort_by(|a, b| {
            b.reservations
                .cmp(&a.reservations)
                .then(a.table_id.cmp(&b.table_id))
        });
        top.truncate(limit);
        Ok(top)
    }
}

fn to_counts(map: BTreeMap<&'static str, i64>) -> Vec<StatusCount> {
    map.into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect()
}
