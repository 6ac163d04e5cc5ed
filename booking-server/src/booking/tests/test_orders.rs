use super::*;
use crate::booking::BookingError;
use crate::db::models::{ComboCreate, Reservation};
use shared::models::{
    CreateTableOrderRequest, OrderLineInput, PaymentStatus, ReservationStatus, TableOrderStatus,
    UpdateOrderLinesRequest,
};
use shared::util::now_millis;

fn line(item: &str, quantity: i32) -> OrderLineInput {
    OrderLineInput {
        item: item.to_string(),
        quantity,
    }
}

fn order_req(table: &str, food: Vec<OrderLineInput>, combos: Vec<OrderLineInput>) -> CreateTableOrderRequest {
    CreateTableOrderRequest {
        table_id: table.to_string(),
        reservation_code: None,
        food_lines: food,
        combo_lines: combos,
    }
}

#[tokio::test]
async fn test_create_order_prices_lines() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let rolls = seed_food(&state, "Gỏi cuốn", 30_000.0).await;

    // A qty 2 @ 50,000 + B qty 1 @ 30,000 = 130,000
    let order = state
        .orders
        .create(&servant(), order_req(&t1, vec![line(&pho, 2), line(&rolls, 1)], vec![]))
        .await
        .unwrap();

    assert_eq!(order.status, TableOrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    assert_eq!(order.total, 130_000.0);
    assert_eq!(order.food_lines.len(), 2);
    assert_eq!(order.food_lines[0].line_total, 100_000.0);
    assert_eq!(order.food_lines[0].name, "Phở bò");
}

#[tokio::test]
async fn test_total_includes_combo_lines() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let family = state
        .catalog
        .repo()
        .create_combo(ComboCreate {
            name: "Family set".to_string(),
            price: 200_000.0,
        })
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string();

    let order = state
        .orders
        .create(
            &servant(),
            order_req(&t1, vec![line(&pho, 1)], vec![line(&family, 2)]),
        )
        .await
        .unwrap();
    assert_eq!(order.total, 450_000.0);
}

#[tokio::test]
async fn test_price_snapshot_survives_catalog_changes() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;

    let order = state
        .orders
        .create(&servant(), order_req(&t1, vec![line(&pho, 2)], vec![]))
        .await
        .unwrap();
    assert_eq!(order.total, 100_000.0);

    // Catalog price change after the fact
    state
        .catalog
        .repo()
        .update_food_price(&pho, 80_000.0)
        .await
        .unwrap();

    let fetched = state.orders.get(&order.key()).await.unwrap();
    assert_eq!(fetched.total, 100_000.0);
    assert_eq!(fetched.food_lines[0].unit_price, 50_000.0);
}

#[tokio::test]
async fn test_create_order_validation() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;

    // No lines
    let err = state
        .orders
        .create(&servant(), order_req(&t1, vec![], vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    // Non-positive quantity
    let err = state
        .orders
        .create(&servant(), order_req(&t1, vec![line(&pho, 0)], vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    // Unknown food reference
    let err = state
        .orders
        .create(
            &servant(),
            order_req(&t1, vec![line("food_item:ghost", 1)], vec![]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InconsistentReference(_)));

    // Unknown table
    let err = state
        .orders
        .create(
            &servant(),
            order_req("dining_table:ghost", vec![line(&pho, 1)], vec![]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InconsistentReference(_)));
}

#[tokio::test]
async fn test_full_service_flow() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let waiter = servant();
    let cook = chef();

    let order = state
        .orders
        .create(&waiter, order_req(&t1, vec![line(&pho, 2)], vec![]))
        .await
        .unwrap();
    let id = order.key();

    let o = state.orders.confirm(&waiter, &id).await.unwrap();
    assert_eq!(o.status, TableOrderStatus::Confirmed);
    let o = state.orders.claim(&cook, &id).await.unwrap();
    assert_eq!(o.status, TableOrderStatus::Preparing);
    let o = state.orders.ready(&cook, &id).await.unwrap();
    assert_eq!(o.status, TableOrderStatus::ReadyToServe);
    let o = state.orders.serve(&waiter, &id).await.unwrap();
    assert_eq!(o.status, TableOrderStatus::Served);

    // Completion requires payment
    let err = state.orders.complete(&waiter, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));

    let o = state.orders.pay(&waiter, &id).await.unwrap();
    assert_eq!(o.payment_status, PaymentStatus::Success);
    assert!(o.paid_at.is_some());

    let o = state.orders.complete(&waiter, &id).await.unwrap();
    assert_eq!(o.status, TableOrderStatus::Completed);
    assert!(o.completed_at.is_some());
}

#[tokio::test]
async fn test_chef_cannot_skip_states() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;

    let order = state
        .orders
        .create(&servant(), order_req(&t1, vec![line(&pho, 1)], vec![]))
        .await
        .unwrap();
    let id = order.key();

    // Claiming a PENDING order fails; it has not been confirmed yet
    let err = state.orders.claim(&chef(), &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));

    // Ready straight from PENDING fails too
    let err = state.orders.ready(&chef(), &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_cancel_preparing_order_blocks_chef() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let waiter = servant();
    let cook = chef();

    let order = state
        .orders
        .create(&waiter, order_req(&t1, vec![line(&pho, 1)], vec![]))
        .await
        .unwrap();
    let id = order.key();
    state.orders.confirm(&waiter, &id).await.unwrap();
    state.orders.claim(&cook, &id).await.unwrap();

    // Cancelling a PREPARING order succeeds
    let o = state.orders.cancel(&waiter, &id).await.unwrap();
    assert_eq!(o.status, TableOrderStatus::Cancelled);

    // Further chef progress fails
    let err = state.orders.ready(&cook, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));

    // And a terminal order cannot be cancelled again
    let err = state.orders.cancel(&waiter, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_payment_freezes_financial_fields() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let waiter = servant();

    let order = state
        .orders
        .create(&waiter, order_req(&t1, vec![line(&pho, 1)], vec![]))
        .await
        .unwrap();
    let id = order.key();

    // Lines can change while unpaid
    let o = state
        .orders
        .update_lines(
            &waiter,
            &id,
            UpdateOrderLinesRequest {
                food_lines: vec![line(&pho, 3)],
                combo_lines: vec![],
            },
        )
        .await
        .unwrap();
    assert_eq!(o.total, 150_000.0);

    state.orders.pay(&waiter, &id).await.unwrap();

    // Paying twice fails
    let err = state.orders.pay(&waiter, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));

    // Financial edits fail after payment
    let err = state
        .orders
        .update_lines(
            &waiter,
            &id,
            UpdateOrderLinesRequest {
                food_lines: vec![line(&pho, 1)],
                combo_lines: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_order_against_reservation_requires_arrival() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let waiter = servant();

    // Confirmed but not arrived
    let now = now_millis();
    let repo = crate::db::repository::ReservationRepository::new(state.db.clone());
    let live = repo
        .create(Reservation {
            id: None,
            code: "BK-LIVE02".to_string(),
            tables: vec![t1.clone()],
            start_at: now - HOUR,
            end_at: now + HOUR,
            party_size: 2,
            customer_name: "Ana García".to_string(),
            phone: "600111222".to_string(),
            email: None,
            note: None,
            status: ReservationStatus::Confirmed,
            servant: None,
            arrived_at: None,
            created_at: now - 2 * HOUR,
            updated_at: now - 2 * HOUR,
        })
        .await
        .unwrap();

    let mut req = order_req(&t1, vec![line(&pho, 1)], vec![]);
    req.reservation_code = Some(live.code.clone());
    let err = state.orders.create(&waiter, req.clone()).await.unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    // After arrival it links up
    state.reservations.mark_arrived(&live.code).await.unwrap();
    let order = state.orders.create(&waiter, req).await.unwrap();
    assert_eq!(order.reservation.as_deref(), Some(live.key().as_str()));

    // Unknown code is NotFound
    let mut req = order_req(&t1, vec![line(&pho, 1)], vec![]);
    req.reservation_code = Some("BK-NOPE42".to_string());
    let err = state.orders.create(&waiter, req).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_kitchen_worklist_query() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let t2 = seed_table(&state, "T2", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let waiter = servant();

    let a = state
        .orders
        .create(&waiter, order_req(&t1, vec![line(&pho, 1)], vec![]))
        .await
        .unwrap();
    let b = state
        .orders
        .create(&waiter, order_req(&t2, vec![line(&pho, 2)], vec![]))
        .await
        .unwrap();
    state.orders.confirm(&waiter, &a.key()).await.unwrap();
    state.orders.confirm(&waiter, &b.key()).await.unwrap();

    let worklist = state
        .orders
        .list_by_status(TableOrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(worklist.len(), 2);

    let by_table = state.orders.list_by_table(&t1).await.unwrap();
    assert_eq!(by_table.len(), 1);
    assert_eq!(by_table[0].key(), a.key());
}
