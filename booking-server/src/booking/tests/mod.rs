//! Engine tests over the in-memory storage engine

mod test_notifications;
mod test_orders;
mod test_reservations;

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

use crate::core::{Config, ServerState};
use crate::db::models::{DiningTableCreate, FoodItemCreate};
use shared::types::{Actor, Role};

pub(crate) const HOUR: i64 = 3_600_000;

/// Fresh state over an in-memory database
pub(crate) async fn test_state() -> ServerState {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("booking").use_db("test").await.unwrap();
    ServerState::with_db(Config::with_overrides("/tmp/booking-test", 0), db)
}

pub(crate) fn servant() -> Actor {
    Actor::new("emp-1", "Marta", Role::Servant)
}

pub(crate) fn chef() -> Actor {
    Actor::new("emp-2", "Luis", Role::Chef)
}

pub(crate) fn customer() -> Actor {
    Actor::new("cust-1", "Ana", Role::Customer)
}

/// Millis `h` hours from now
pub(crate) fn at_hour(h: i64) -> i64 {
    shared::util::now_millis() + h * HOUR
}

pub(crate) async fn seed_table(state: &ServerState, name: &str, capacity: i32) -> String {
    state
        .tables
        .create(DiningTableCreate {
            name: name.to_string(),
            capacity: Some(capacity),
        })
        .await
        .unwrap()
        .key()
}

pub(crate) async fn seed_food(state: &ServerState, name: &str, price: f64) -> String {
    state
        .catalog
        .repo()
        .create_food(FoodItemCreate {
            name: name.to_string(),
            price,
        })
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string()
}

pub(crate) fn booking_req(
    tables: Vec<String>,
    start_at: i64,
    end_at: i64,
    party_size: i32,
) -> shared::models::CreateReservationRequest {
    shared::models::CreateReservationRequest {
        tables,
        start_at,
        end_at: Some(end_at),
        party_size,
        customer_name: "Ana García".to_string(),
        phone: "600111222".to_string(),
        email: None,
        note: None,
    }
}
