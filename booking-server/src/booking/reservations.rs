//! Reservation State Machine
//!
//! ```text
//! PENDING ──confirm──▶ CONFIRMED ──complete──▶ COMPLETED
//!    │                     ├──cancel/reject──▶ CANCELLED
//!    └──reject───────────▶ CANCELLED
//!                          └──no-show────────▶ NO_SHOW
//! ```
//!
//! The create/edit path is the atomic check-and-reserve: per-table async
//! locks are taken in sorted key order, the overlap check runs against the
//! store under those locks, and only then is the record written. Two
//! concurrent creates for an overlapping window on the same table therefore
//! serialize, and exactly one succeeds.

use std::sync::Arc;

use dashmap::DashMap;
use shared::models::{CreateReservationRequest, NotificationKind, ReservationStatus, UpdateReservationRequest};
use shared::types::{Actor, Role};
use shared::util::{now_millis, reservation_code};
use tokio::sync::Mutex;
use tracing::info;

use super::availability::{check_party_fit, has_conflict, resolve_window_end, validate_window};
use super::{BookingError, BookingPolicy, BookingResult};
use crate::db::models::Reservation;
use crate::db::repository::{DiningTableRepository, ReservationRepository};
use crate::notify::NotificationService;

/// Attempts to mint an unused reservation code before giving up
const CODE_ALLOC_ATTEMPTS: usize = 8;

pub struct ReservationService {
    repo: ReservationRepository,
    tables: DiningTableRepository,
    notifier: Arc<NotificationService>,
    policy: BookingPolicy,
    /// Per-table write locks; entries are created on first use and kept for
    /// the life of the process (bounded by the physical table count)
    table_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ReservationService {
    pub fn new(
        repo: ReservationRepository,
        tables: DiningTableRepository,
        notifier: Arc<NotificationService>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            repo,
            tables,
            notifier,
            policy,
            table_locks: DashMap::new(),
        }
    }

    // ========== Queries ==========

    pub async fn get(&self, id: &str) -> BookingResult<Reservation> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation {} not found", id)))
    }

    pub async fn find_by_code(&self, code: &str) -> BookingResult<Reservation> {
        self.repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("No reservation for code {}", code)))
    }

    /// Reservations whose window starts inside [from, to)
    pub async fn list_range(&self, from: i64, to: i64) -> BookingResult<Vec<Reservation>> {
        Ok(self.repo.find_in_range(from, to).await?)
    }

    pub async fn list_by_status(
        &self,
        status: ReservationStatus,
    ) -> BookingResult<Vec<Reservation>> {
        Ok(self.repo.find_by_status(status).await?)
    }

    // ========== Create / Edit (atomic check-and-reserve) ==========

    /// Create a reservation (customer, or servant on a customer's behalf)
    pub async fn create(
        &self,
        actor: &Actor,
        req: CreateReservationRequest,
    ) -> BookingResult<Reservation> {
        if req.party_size <= 0 {
            return Err(BookingError::Validation(
                "party size must be positive".to_string(),
            ));
        }
        let start_at = req.start_at;
        let end_at = resolve_window_end(start_at, req.end_at, &self.policy)?;
        validate_window(now_millis(), start_at, self.policy.min_lead_time_ms())?;

        let keys = normalize_table_keys(&req.tables)?;
        let combined = self.combined_capacity(&keys).await?;
        check_party_fit(req.party_size, combined, self.policy.capacity_tolerance)?;

        // Serialize against other writers touching any of these tables
        let handles = self.lock_handles(&keys);
        let mut guards = Vec::with_capacity(handles.len());
        for handle in &handles {
            guards.push(handle.lock().await);
        }

        // Write-time conflict check; the earlier availability read is only a hint
        let window = self.repo.find_in_window(start_at, end_at).await?;
        if has_conflict(&window, &keys, start_at, end_at, None) {
            return Err(BookingError::Conflict(
                "one or more tables are already booked for this window".to_string(),
            ));
        }

        let code = self.allocate_code().await?;
        let now = now_millis();
        let created = self
            .repo
            .create(Reservation {
                id: None,
                code,
                tables: keys,
                start_at,
                end_at,
                party_size: req.party_size,
                customer_name: req.customer_name,
                phone: req.phone,
                email: req.email,
                note: req.note,
                status: ReservationStatus::Pending,
                servant: None,
                arrived_at: None,
                created_at: now,
                updated_at: now,
            })
            .await?;
        drop(guards);

        info!(
            code = %created.code,
            party_size = created.party_size,
            operator = %actor.id,
            "Reservation created"
        );
        self.notifier
            .emit(
                NotificationKind::ReservationCreated,
                Role::Servant,
                "New reservation",
                format!(
                    "{} booked {} seats ({})",
                    created.customer_name, created.party_size, created.code
                ),
                Some(created.key()),
            )
            .await;
        Ok(created)
    }

    /// Edit window, party size, tables or note (servant, PENDING/CONFIRMED).
    ///
    /// Re-runs the same conflict check as create, excluding the reservation
    /// itself.
    pub async fn edit(
        &self,
        actor: &Actor,
        id: &str,
        req: UpdateReservationRequest,
    ) -> BookingResult<Reservation> {
        let existing = self.get(id).await?;
        if existing.status.is_terminal() {
            return Err(BookingError::InvalidTransition(format!(
                "cannot edit reservation in status {}",
                existing.status
            )));
        }

        let keys = match req.tables {
            Some(ref tables) => normalize_table_keys(tables)?,
            None => existing.tables.clone(),
        };
        let start_at = req.start_at.unwrap_or(existing.start_at);
        // Preserve the original window length unless an explicit end is given
        let end_at = req
            .end_at
            .unwrap_or(start_at + (existing.end_at - existing.start_at));
        if end_at <= start_at {
            return Err(BookingError::Validation(
                "window end must be after start".to_string(),
            ));
        }
        validate_window(now_millis(), start_at, self.policy.min_lead_time_ms())?;

        let party_size = req.party_size.unwrap_or(existing.party_size);
        if party_size <= 0 {
            return Err(BookingError::Validation(
                "party size must be positive".to_string(),
            ));
        }
        let combined = self.combined_capacity(&keys).await?;
        check_party_fit(party_size, combined, self.policy.capacity_tolerance)?;

        // Lock the union of old and new tables so a concurrent create on a
        // table being vacated still serializes correctly
        let mut lock_keys = keys.clone();
        lock_keys.extend(existing.tables.iter().cloned());
        lock_keys.sort();
        lock_keys.dedup();
        let handles = self.lock_handles(&lock_keys);
        let mut guards = Vec::with_capacity(handles.len());
        for handle in &handles {
            guards.push(handle.lock().await);
        }

        let window = self.repo.find_in_window(start_at, end_at).await?;
        if has_conflict(&window, &keys, start_at, end_at, Some(id)) {
            return Err(BookingError::Conflict(
                "one or more tables are already booked for this window".to_string(),
            ));
        }

        let note = req.note.or(existing.note);
        let updated = self
            .repo
            .update_booking(id, keys, start_at, end_at, party_size, note, now_millis())
            .await?;
        drop(guards);

        info!(code = %updated.code, operator = %actor.id, "Reservation edited");
        Ok(updated)
    }

    // ========== Transitions ==========

    /// Servant accepts a pending reservation
    pub async fn confirm(&self, actor: &Actor, id: &str) -> BookingResult<Reservation> {
        let existing = self.get(id).await?;
        guard(&existing, ReservationStatus::Pending, "confirm")?;
        let updated = self
            .repo
            .update_status(id, ReservationStatus::Confirmed, now_millis())
            .await?;
        info!(code = %updated.code, operator = %actor.id, "Reservation confirmed");
        self.notifier
            .emit(
                NotificationKind::ReservationConfirmed,
                Role::Customer,
                "Reservation confirmed",
                format!("Reservation {} is confirmed", updated.code),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    /// Servant turns down a pending reservation
    pub async fn reject(&self, actor: &Actor, id: &str) -> BookingResult<Reservation> {
        let existing = self.get(id).await?;
        guard(&existing, ReservationStatus::Pending, "reject")?;
        let updated = self
            .repo
            .update_status(id, ReservationStatus::Cancelled, now_millis())
            .await?;
        info!(code = %updated.code, operator = %actor.id, "Reservation rejected");
        self.notifier
            .emit(
                NotificationKind::ReservationRejected,
                Role::Customer,
                "Reservation rejected",
                format!("Reservation {} was rejected", updated.code),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    /// Servant cancels a confirmed reservation
    pub async fn cancel(&self, actor: &Actor, id: &str) -> BookingResult<Reservation> {
        let existing = self.get(id).await?;
        guard(&existing, ReservationStatus::Confirmed, "cancel")?;
        let updated = self
            .repo
            .update_status(id, ReservationStatus::Cancelled, now_millis())
            .await?;
        info!(code = %updated.code, operator = %actor.id, "Reservation cancelled");
        Ok(updated)
    }

    /// Close out a confirmed reservation after the window elapsed
    pub async fn complete(&self, actor: &Actor, id: &str) -> BookingResult<Reservation> {
        let existing = self.get(id).await?;
        guard(&existing, ReservationStatus::Confirmed, "complete")?;
        let updated = self
            .repo
            .update_status(id, ReservationStatus::Completed, now_millis())
            .await?;
        info!(code = %updated.code, operator = %actor.id, "Reservation completed");
        self.notifier
            .emit(
                NotificationKind::ReservationCompleted,
                Role::Servant,
                "Reservation completed",
                format!("Reservation {} completed", updated.code),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    /// Staff-initiated no-show determination
    pub async fn no_show(&self, actor: &Actor, id: &str) -> BookingResult<Reservation> {
        let existing = self.get(id).await?;
        guard(&existing, ReservationStatus::Confirmed, "mark no-show")?;
        let updated = self
            .repo
            .update_status(id, ReservationStatus::NoShow, now_millis())
            .await?;
        info!(code = %updated.code, operator = %actor.id, "Reservation marked no-show");
        self.notifier
            .emit(
                NotificationKind::ReservationNoShow,
                Role::Servant,
                "No-show",
                format!("Reservation {} marked as no-show", updated.code),
                Some(updated.key()),
            )
            .await;
        Ok(updated)
    }

    /// Attach an assigned servant while the reservation is live
    pub async fn assign_servant(
        &self,
        actor: &Actor,
        id: &str,
        servant: String,
    ) -> BookingResult<Reservation> {
        let existing = self.get(id).await?;
        if existing.status.is_terminal() {
            return Err(BookingError::InvalidTransition(format!(
                "cannot assign servant in status {}",
                existing.status
            )));
        }
        let updated = self.repo.set_servant(id, servant, now_millis()).await?;
        info!(code = %updated.code, operator = %actor.id, "Servant assigned");
        Ok(updated)
    }

    /// Delete is permitted only while PENDING
    pub async fn delete(&self, actor: &Actor, id: &str) -> BookingResult<()> {
        let existing = self.get(id).await?;
        guard(&existing, ReservationStatus::Pending, "delete")?;
        self.repo.delete(id).await?;
        info!(code = %existing.code, operator = %actor.id, "Reservation deleted");
        self.notifier
            .emit(
                NotificationKind::ReservationDeletedByServant,
                Role::Servant,
                "Reservation deleted",
                format!("Reservation {} was deleted", existing.code),
                None,
            )
            .await;
        Ok(())
    }

    /// Out-of-band arrival signal, matched by code.
    ///
    /// Does not change status; records arrival and thereby authorizes
    /// table-order creation. Resolves only a CONFIRMED reservation whose
    /// window covers the current instant.
    pub async fn mark_arrived(&self, code: &str) -> BookingResult<Reservation> {
        let existing = self.find_by_code(code).await?;
        let now = now_millis();
        if existing.status != ReservationStatus::Confirmed
            || now < existing.start_at
            || now >= existing.end_at
        {
            return Err(BookingError::NotFound(format!(
                "No active confirmed reservation for code {}",
                code
            )));
        }
        let updated = self.repo.set_arrived(&existing.key(), now).await?;
        info!(code = %updated.code, "Customer arrived");
        Ok(updated)
    }

    // ========== Internals ==========

    /// Sum the capacity of the requested tables, failing on unknown or
    /// disabled references
    async fn combined_capacity(&self, keys: &[String]) -> BookingResult<i32> {
        let mut combined = 0;
        for key in keys {
            let table = self
                .tables
                .find_by_id(key)
                .await?
                .filter(|t| t.is_active)
                .ok_or_else(|| {
                    BookingError::InconsistentReference(format!("Table {} does not exist", key))
                })?;
            combined += table.capacity;
        }
        Ok(combined)
    }

    /// Lock handles for the given (sorted, deduplicated) table keys
    fn lock_handles(&self, keys: &[String]) -> Vec<Arc<Mutex<()>>> {
        keys.iter()
            .map(|key| {
                self.table_locks
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .value()
                    .clone()
            })
            .collect()
    }

    async fn allocate_code(&self) -> BookingResult<String> {
        for _ in 0..CODE_ALLOC_ATTEMPTS {
            let code = reservation_code();
            if self.repo.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }
        Err(BookingError::Database(
            "failed to allocate a unique reservation code".to_string(),
        ))
    }
}

/// Single-predecessor status guard
fn guard(
    reservation: &Reservation,
    expected: ReservationStatus,
    action: &str,
) -> BookingResult<()> {
    if reservation.status != expected {
        return Err(BookingError::InvalidTransition(format!(
            "cannot {} reservation in status {}",
            action, reservation.status
        )));
    }
    Ok(())
}

/// Sort + dedup the requested table keys, rejecting an empty set
fn normalize_table_keys(tables: &[String]) -> BookingResult<Vec<String>> {
    if tables.is_empty() {
        return Err(BookingError::Validation(
            "at least one table is required".to_string(),
        ));
    }
    let mut keys = tables.to_vec();
    keys.sort();
    keys.dedup();
    Ok(keys)
}
