use super::*;
use shared::models::{NotificationKind, OrderLineInput};
use shared::types::Role;

#[tokio::test]
async fn test_lifecycle_events_reach_role_scopes() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let pho = seed_food(&state, "Phở bò", 50_000.0).await;
    let waiter = servant();

    let r = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();

    // Creation notifies the servant scope
    let servant_inbox = state.notifier.list(Role::Servant).await.unwrap();
    assert!(
        servant_inbox
            .iter()
            .any(|n| n.kind == NotificationKind::ReservationCreated
                && n.related.as_deref() == Some(r.key().as_str()))
    );

    // Confirmation notifies the customer scope
    state.reservations.confirm(&waiter, &r.key()).await.unwrap();
    let customer_inbox = state.notifier.list(Role::Customer).await.unwrap();
    assert!(
        customer_inbox
            .iter()
            .any(|n| n.kind == NotificationKind::ReservationConfirmed)
    );

    // Order creation notifies the chef scope
    state
        .orders
        .create(
            &waiter,
            shared::models::CreateTableOrderRequest {
                table_id: t1,
                reservation_code: None,
                food_lines: vec![OrderLineInput {
                    item: pho,
                    quantity: 1,
                }],
                combo_lines: vec![],
            },
        )
        .await
        .unwrap();
    let chef_inbox = state.notifier.list(Role::Chef).await.unwrap();
    assert!(
        chef_inbox
            .iter()
            .any(|n| n.kind == NotificationKind::TableOrderCreated)
    );
}

#[tokio::test]
async fn test_subscribe_receives_live_events() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    let mut rx = state.notifier.subscribe();
    state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.kind, NotificationKind::ReservationCreated);
    assert_eq!(event.scope, Role::Servant);
    assert!(!event.is_read);
}

#[tokio::test]
async fn test_mark_read_and_delete() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();

    let inbox = state.notifier.list(Role::Servant).await.unwrap();
    assert_eq!(inbox.len(), 1);
    let id = inbox[0].id.as_ref().unwrap().to_string();

    let read = state.notifier.mark_read(&id).await.unwrap();
    assert!(read.is_read);

    state.notifier.delete(&id).await.unwrap();
    let inbox = state.notifier.list(Role::Servant).await.unwrap();
    assert!(inbox.is_empty());
}
