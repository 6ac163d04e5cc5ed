//! Reservation & Table-Order Lifecycle Engine
//!
//! The only part of the system with real invariants to protect:
//!
//! - **availability**: which tables are actually free for a window
//! - **reservations**: booking lifecycle with an atomic check-and-reserve
//!   write path (per-table locks, sorted acquisition)
//! - **table_orders**: kitchen/service state machine with a payment side
//!   channel
//!
//! # Write-path contract
//!
//! ```text
//! create/edit ──▶ lock tables (sorted) ──▶ re-check overlap ──▶ insert
//!                                                 │
//!                                      stale availability reads are
//!                                      safe: this check is the net
//! ```
//!
//! Notifications are emitted after the transition commits and never roll
//! it back.

pub mod availability;
pub mod error;
pub mod reservations;
pub mod table_orders;

#[cfg(test)]
mod tests;

pub use availability::AvailabilityService;
pub use error::{BookingError, BookingResult};
pub use reservations::ReservationService;
pub use table_orders::TableOrderService;

/// Booking policy knobs - product policy, not engineering constraints
#[derive(Debug, Clone, Copy)]
pub struct BookingPolicy {
    /// Derived window length when the caller gives no explicit end
    pub service_duration_min: i64,
    /// Same-day bookings must start at least this far from now
    pub min_lead_time_min: i64,
    /// Permitted excess seats per table combination
    pub capacity_tolerance: i32,
}

impl BookingPolicy {
    pub fn service_duration_ms(&self) -> i64 {
        self.service_duration_min * 60_000
    }

    pub fn min_lead_time_ms(&self) -> i64 {
        self.min_lead_time_min * 60_000
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            service_duration_min: 120,
            min_lead_time_min: 30,
            capacity_tolerance: 2,
        }
    }
}
