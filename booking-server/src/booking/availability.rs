//! Availability Calculator
//!
//! Read path over the table registry and the live reservation set. Results
//! may go stale the moment they are returned; the reservation write path
//! re-checks under its own locks.

use serde::Serialize;
use shared::util::{now_millis, windows_overlap};

use super::{BookingError, BookingPolicy, BookingResult};
use crate::db::models::{DiningTable, Reservation};
use crate::db::repository::{DiningTableRepository, ReservationRepository};

/// Availability query result - the free set annotated with capacity
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub start_at: i64,
    pub end_at: i64,
    pub free: Vec<DiningTable>,
    pub occupied: Vec<DiningTable>,
}

#[derive(Clone)]
pub struct AvailabilityService {
    tables: DiningTableRepository,
    reservations: ReservationRepository,
    policy: BookingPolicy,
}

impl AvailabilityService {
    pub fn new(
        tables: DiningTableRepository,
        reservations: ReservationRepository,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            tables,
            reservations,
            policy,
        }
    }

    /// Compute the free/occupied partition for a requested window.
    ///
    /// `end_at` defaults to start + service duration.
    pub async fn free_tables(
        &self,
        start_at: i64,
        end_at: Option<i64>,
        party_size: i32,
    ) -> BookingResult<AvailabilityResponse> {
        if party_size <= 0 {
            return Err(BookingError::Validation(
                "party size must be positive".to_string(),
            ));
        }
        let end_at = resolve_window_end(start_at, end_at, &self.policy)?;
        validate_window(now_millis(), start_at, self.policy.min_lead_time_ms())?;

        let (tables, reservations) = futures::try_join!(
            async { self.tables.find_all().await.map_err(BookingError::from) },
            async {
                self.reservations
                    .find_in_window(start_at, end_at)
                    .await
                    .map_err(BookingError::from)
            }
        )?;

        let (free, occupied) = partition_free(tables, &reservations);
        Ok(AvailabilityResponse {
            start_at,
            end_at,
            free,
            occupied,
        })
    }
}

/// Resolve the window end, rejecting inverted windows
pub fn resolve_window_end(
    start_at: i64,
    end_at: Option<i64>,
    policy: &BookingPolicy,
) -> BookingResult<i64> {
    let end = end_at.unwrap_or(start_at + policy.service_duration_ms());
    if end <= start_at {
        return Err(BookingError::Validation(
            "window end must be after start".to_string(),
        ));
    }
    Ok(end)
}

/// Reject past windows and same-day starts inside the preparation lead time
pub fn validate_window(now: i64, start_at: i64, min_lead_ms: i64) -> BookingResult<()> {
    if start_at < now {
        return Err(BookingError::Validation(
            "requested window is in the past".to_string(),
        ));
    }
    if start_at - now < min_lead_ms {
        return Err(BookingError::Validation(format!(
            "requested start is less than {} minutes from now",
            min_lead_ms / 60_000
        )));
    }
    Ok(())
}

/// Partition tables into free and occupied for the already-fetched
/// window-intersecting reservations. Cancelled/no-show bookings release
/// their tables.
pub fn partition_free(
    tables: Vec<DiningTable>,
    reservations: &[Reservation],
) -> (Vec<DiningTable>, Vec<DiningTable>) {
    tables.into_iter().partition(|t| {
        let key = t.key();
        !reservations
            .iter()
            .filter(|r| r.status.blocks_table())
            .any(|r| r.tables.contains(&key))
    })
}

/// Whether any blocking reservation commits one of `table_keys` for a
/// window overlapping [start_at, end_at). `exclude` skips the reservation
/// being edited.
pub fn has_conflict(
    reservations: &[Reservation],
    table_keys: &[String],
    start_at: i64,
    end_at: i64,
    exclude: Option<&str>,
) -> bool {
    reservations
        .iter()
        .filter(|r| r.status.blocks_table())
        .filter(|r| exclude.is_none_or(|id| r.key() != id))
        .filter(|r| windows_overlap(r.start_at, r.end_at, start_at, end_at))
        .any(|r| r.uses_any_table(table_keys))
}

/// Party-size / capacity fit under the overlap-tolerance policy
pub fn check_party_fit(
    party_size: i32,
    combined_capacity: i32,
    tolerance: i32,
) -> BookingResult<()> {
    if party_size > combined_capacity {
        return Err(BookingError::Validation(format!(
            "party of {} exceeds combined capacity {}",
            party_size, combined_capacity
        )));
    }
    if combined_capacity > party_size + tolerance {
        return Err(BookingError::Validation(format!(
            "combined capacity {} exceeds party of {} by more than {} seats",
            combined_capacity, party_size, tolerance
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ReservationStatus;

    const HOUR: i64 = 3_600_000;

    fn reservation(tables: Vec<&str>, start: i64, end: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id: Some("reservation:r1".parse().unwrap()),
            code: "BK-TEST01".to_string(),
            tables: tables.into_iter().map(String::from).collect(),
            start_at: start,
            end_at: end,
            party_size: 2,
            customer_name: "Ana".to_string(),
            phone: "600123123".to_string(),
            email: None,
            note: None,
            status,
            servant: None,
            arrived_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_validate_window_rejects_past() {
        let now = 100 * HOUR;
        let err = validate_window(now, now - HOUR, 30 * 60_000).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn test_validate_window_rejects_short_lead() {
        let now = 100 * HOUR;
        // 10 minutes out, 30 minutes required
        let err = validate_window(now, now + 10 * 60_000, 30 * 60_000).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
        assert!(validate_window(now, now + HOUR, 30 * 60_000).is_ok());
    }

    #[test]
    fn test_has_conflict_overlap_and_abutment() {
        let existing = vec![reservation(
            vec!["dining_table:t1"],
            19 * HOUR,
            21 * HOUR,
            ReservationStatus::Pending,
        )];
        let keys = vec!["dining_table:t1".to_string()];
        // 20:00-22:00 overlaps
        assert!(has_conflict(&existing, &keys, 20 * HOUR, 22 * HOUR, None));
        // 21:00-23:00 abuts, no conflict
        assert!(!has_conflict(&existing, &keys, 21 * HOUR, 23 * HOUR, None));
        // different table, no conflict
        let other = vec!["dining_table:t2".to_string()];
        assert!(!has_conflict(&existing, &other, 20 * HOUR, 22 * HOUR, None));
    }

    #[test]
    fn test_has_conflict_ignores_released_and_excluded() {
        let keys = vec!["dining_table:t1".to_string()];
        let cancelled = vec![reservation(
            vec!["dining_table:t1"],
            19 * HOUR,
            21 * HOUR,
            ReservationStatus::Cancelled,
        )];
        assert!(!has_conflict(&cancelled, &keys, 20 * HOUR, 22 * HOUR, None));

        let active = vec![reservation(
            vec!["dining_table:t1"],
            19 * HOUR,
            21 * HOUR,
            ReservationStatus::Confirmed,
        )];
        // editing the reservation itself is not a self-conflict
        assert!(!has_conflict(
            &active,
            &keys,
            20 * HOUR,
            22 * HOUR,
            Some("reservation:r1"),
        ));
    }

    #[test]
    fn test_partition_free() {
        let t1 = DiningTable {
            id: Some("dining_table:t1".parse().unwrap()),
            name: "T1".to_string(),
            capacity: 4,
            is_active: true,
        };
        let t2 = DiningTable {
            id: Some("dining_table:t2".parse().unwrap()),
            name: "T2".to_string(),
            capacity: 2,
            is_active: true,
        };
        let reservations = vec![reservation(
            vec!["dining_table:t1"],
            19 * HOUR,
            21 * HOUR,
            ReservationStatus::Confirmed,
        )];
        let (free, occupied) = partition_free(vec![t1, t2], &reservations);
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].name, "T2");
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied[0].name, "T1");
    }

    #[test]
    fn test_check_party_fit_tolerance() {
        // exact fit
        assert!(check_party_fit(4, 4, 2).is_ok());
        // within tolerance
        assert!(check_party_fit(4, 6, 2).is_ok());
        // party too large
        assert!(check_party_fit(5, 4, 2).is_err());
        // wasteful combination
        assert!(check_party_fit(1, 4, 2).is_err());
    }
}
