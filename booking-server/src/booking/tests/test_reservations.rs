use super::*;
use crate::booking::BookingError;
use crate::db::models::Reservation;
use shared::models::{ReservationStatus, UpdateReservationRequest};
use shared::util::now_millis;

#[tokio::test]
async fn test_create_reservation() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    let created = state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();

    assert_eq!(created.status, ReservationStatus::Pending);
    assert!(created.code.starts_with("BK-"));
    assert_eq!(created.party_size, 4);

    let fetched = state.reservations.find_by_code(&created.code).await.unwrap();
    assert_eq!(fetched.key(), created.key());
}

#[tokio::test]
async fn test_overlapping_window_conflicts() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    // R1: 19:00-21:00
    state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();

    // 20:00-22:00 on the same table conflicts
    let err = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(20), at_hour(22), 4))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Conflict(_)));

    // 21:00-23:00 exactly abuts and succeeds
    state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(21), at_hour(23), 4))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_conflict_spans_multi_table_reservations() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let t2 = seed_table(&state, "T2", 4).await;

    // Party of 8 takes both tables
    state
        .reservations
        .create(
            &servant(),
            booking_req(vec![t1.clone(), t2.clone()], at_hour(19), at_hour(21), 8),
        )
        .await
        .unwrap();

    // Either table alone is committed for the window
    let err = state
        .reservations
        .create(&customer(), booking_req(vec![t2], at_hour(20), at_hour(22), 4))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Conflict(_)));
}

#[tokio::test]
async fn test_concurrent_creates_one_wins() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    let svc = state.reservations.clone();
    let req_a = booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 4);
    let req_b = booking_req(vec![t1], at_hour(20), at_hour(22), 4);

    let actor = customer();
    let (a, b) = tokio::join!(svc.create(&actor, req_a), svc.create(&actor, req_b));

    // Exactly one winner; the loser sees Conflict
    assert!(
        a.is_ok() != b.is_ok(),
        "expected exactly one success, got {:?} / {:?}",
        a.as_ref().map(|r| r.code.clone()),
        b.as_ref().map(|r| r.code.clone())
    );
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser.unwrap_err(), BookingError::Conflict(_)));
}

#[tokio::test]
async fn test_cancelled_reservation_releases_table() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    let r1 = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
    state.reservations.reject(&servant(), &r1.key()).await.unwrap();

    // The window is free again
    state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_window_validation() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    // Past window
    let err = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(-2), at_hour(-1), 4))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    // Inside the minimum lead time (default 30 min)
    let soon = now_millis() + 10 * 60_000;
    let err = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], soon, soon + 2 * HOUR, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    // Inverted window
    let err = state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(21), at_hour(19), 4))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

#[tokio::test]
async fn test_capacity_fit_policy() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    // Party larger than the table
    let err = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 6))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    // Wasteful combination: 4 seats for a party of 1 exceeds the 2-seat tolerance
    let err = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    // Within tolerance
    state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_table_is_inconsistent_reference() {
    let state = test_state().await;
    let err = state
        .reservations
        .create(
            &customer(),
            booking_req(vec!["dining_table:ghost".to_string()], at_hour(19), at_hour(21), 2),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InconsistentReference(_)));
}

#[tokio::test]
async fn test_transition_guards() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let actor = servant();

    let r = state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
    let id = r.key();

    // Pending -> Confirmed
    let confirmed = state.reservations.confirm(&actor, &id).await.unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    // Confirming twice fails
    let err = state.reservations.confirm(&actor, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));

    // Delete after confirmation fails
    let err = state.reservations.delete(&actor, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));

    // Confirmed -> Cancelled, then nothing else
    state.reservations.cancel(&actor, &id).await.unwrap();
    let err = state.reservations.confirm(&actor, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));
    let err = state.reservations.complete(&actor, &id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_complete_and_no_show_paths() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let actor = servant();

    let a = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
    state.reservations.confirm(&actor, &a.key()).await.unwrap();
    let done = state.reservations.complete(&actor, &a.key()).await.unwrap();
    assert_eq!(done.status, ReservationStatus::Completed);

    let b = state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(22), at_hour(23), 4))
        .await
        .unwrap();
    // No-show requires a confirmed reservation
    let err = state.reservations.no_show(&actor, &b.key()).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition(_)));
    state.reservations.confirm(&actor, &b.key()).await.unwrap();
    let gone = state.reservations.no_show(&actor, &b.key()).await.unwrap();
    assert_eq!(gone.status, ReservationStatus::NoShow);
}

#[tokio::test]
async fn test_delete_pending() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let actor = servant();

    let r = state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
    state.reservations.delete(&actor, &r.key()).await.unwrap();

    let err = state.reservations.get(&r.key()).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_edit_reruns_conflict_check() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let t2 = seed_table(&state, "T2", 4).await;
    let actor = servant();

    state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
    let r2 = state
        .reservations
        .create(&customer(), booking_req(vec![t2], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();

    // Moving R2 onto T1 for the same window conflicts
    let err = state
        .reservations
        .edit(
            &actor,
            &r2.key(),
            UpdateReservationRequest {
                tables: Some(vec![t1.clone()]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Conflict(_)));

    // Re-timing R2 on its own table is fine, and keeps the window length
    let edited = state
        .reservations
        .edit(
            &actor,
            &r2.key(),
            UpdateReservationRequest {
                start_at: Some(at_hour(22)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.end_at - edited.start_at, 2 * HOUR);

    // Editing its own window is not a self-conflict
    state
        .reservations
        .edit(
            &actor,
            &r2.key(),
            UpdateReservationRequest {
                party_size: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_assign_servant() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;
    let actor = servant();

    let r = state
        .reservations
        .create(&customer(), booking_req(vec![t1], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
    let updated = state
        .reservations
        .assign_servant(&actor, &r.key(), "emp-7".to_string())
        .await
        .unwrap();
    assert_eq!(updated.servant.as_deref(), Some("emp-7"));
}

#[tokio::test]
async fn test_mark_arrived_by_code() {
    let state = test_state().await;
    let t1 = seed_table(&state, "T1", 4).await;

    // Unknown code
    let err = state.reservations.mark_arrived("BK-NOPE42").await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    // Pending (not confirmed) reservation does not resolve
    let pending = state
        .reservations
        .create(&customer(), booking_req(vec![t1.clone()], at_hour(19), at_hour(21), 4))
        .await
        .unwrap();
    let err = state
        .reservations
        .mark_arrived(&pending.code)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    // Confirmed reservation whose window covers now: seed directly, since
    // the create path rightly refuses windows that already started
    let now = now_millis();
    let repo = crate::db::repository::ReservationRepository::new(state.db.clone());
    let live = repo
        .create(Reservation {
            id: None,
            code: "BK-LIVE01".to_string(),
            tables: vec![t1],
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

    let arrived = state.reservations.mark_arrived(&live.code).await.unwrap();
    assert_eq!(arrived.status, ReservationStatus::Confirmed);
    assert!(arrived.arrived_at.is_some());
}
