//! Reservation Repository
//!
//! 时间窗口查询只做区间过滤；状态/桌台过滤在引擎侧完成。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Reservation;
use shared::models::ReservationStatus;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find reservation by id ("reservation:xxx")
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// Find reservation by human-readable code
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Reservation>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE code = $code LIMIT 1")
            .bind(("code", code.to_string()))
            .await?;
        let rows: Vec<Reservation> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// All reservations whose [start_at, end_at) intersects [start, end)
    pub async fn find_in_window(&self, start: i64, end: i64) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE start_at < $end AND end_at > $start ORDER BY start_at",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let rows: Vec<Reservation> = result.take(0)?;
        Ok(rows)
    }

    /// All reservations created for a window starting inside [from, to)
    pub async fn find_in_range(&self, from: i64, to: i64) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE start_at >= $from AND start_at < $to ORDER BY start_at",
            )
            .bind(("from", from))
            .bind(("to", to))
            .await?;
        let rows: Vec<Reservation> = result.take(0)?;
        Ok(rows)
    }

    /// All reservations in a given status
    pub async fn find_by_status(&self, status: ReservationStatus) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE status = $status ORDER BY start_at")
            .bind(("status", status.as_str()))
            .await?;
        let rows: Vec<Reservation> = result.take(0)?;
        Ok(rows)
    }

    /// Insert a new reservation
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Set the lifecycle status
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        now: i64,
    ) -> RepoResult<Reservation> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now")
            .bind(("thing", thing))
            .bind(("status", status.as_str()))
            .bind(("now", now))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Rewrite the booking fields (edit path; caller re-ran the conflict check)
    #[allow(clippy::too_many_arguments)]
    pub async fn update_booking(
        &self,
        id: &str,
        tables: Vec<String>,
        start_at: i64,
        end_at: i64,
        party_size: i32,
        note: Option<String>,
        now: i64,
    ) -> RepoResult<Reservation> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET tables = $tables, start_at = $start_at, end_at = $end_at, \
                 party_size = $party_size, note = $note, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("tables", tables))
            .bind(("start_at", start_at))
            .bind(("end_at", end_at))
            .bind(("party_size", party_size))
            .bind(("note", note))
            .bind(("now", now))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Record the customer's arrival
    pub async fn set_arrived(&self, id: &str, now: i64) -> RepoResult<Reservation> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET arrived_at = $now, updated_at = $now")
            .bind(("thing", thing))
            .bind(("now", now))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Attach an assigned servant
    pub async fn set_servant(&self, id: &str, servant: String, now: i64) -> RepoResult<Reservation> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET servant = $servant, updated_at = $now")
            .bind(("thing", thing))
            .bind(("servant", servant))
            .bind(("now", now))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Hard delete (only the PENDING path uses this)
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
