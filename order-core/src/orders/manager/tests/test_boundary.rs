use super::*;
use crate::orders::money::MAX_QUANTITY;
use shared::error::{AppError, ErrorCode};

#[test]
fn test_create_rejects_empty_items() {
    let manager = create_test_manager();
    let err = manager.create(&buyer(), vec![]).unwrap_err();
    assert!(matches!(err, OrderError::EmptyOrder));
}

#[test]
fn test_create_rejects_non_positive_quantity() {
    let manager = create_test_manager();

    for quantity in [0, -1, -100] {
        let err = manager
            .create(&buyer(), vec![line("apple", quantity)])
            .unwrap_err();
        match err {
            OrderError::InvalidQuantity {
                item_id,
                quantity: q,
            } => {
                assert_eq!(item_id, "apple");
                assert_eq!(q, quantity);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    // Nothing was reserved
    assert_eq!(stock_of(&manager, "apple"), 10);
}

#[test]
fn test_create_rejects_oversized_quantity() {
    let manager = create_test_manager();
    let err = manager
        .create(&buyer(), vec![line("apple", MAX_QUANTITY + 1)])
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidQuantity { .. }));
}

#[test]
fn test_create_names_every_unknown_item() {
    let manager = create_test_manager();

    let err = manager
        .create(
            &buyer(),
            vec![line("zucchini", 1), line("apple", 1), line("avocado", 2)],
        )
        .unwrap_err();
    match err {
        OrderError::UnknownItems { item_ids } => {
            assert_eq!(item_ids, vec!["avocado".to_string(), "zucchini".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }

    // No order persisted, no stock touched
    assert!(manager.list_for(&admin()).unwrap().is_empty());
    assert_eq!(stock_of(&manager, "apple"), 10);
}

#[test]
fn test_create_names_insufficient_item_and_amounts() {
    let manager = create_test_manager();

    // Banana: stock 2, request 5
    let err = manager
        .create(&buyer(), vec![line("banana", 5)])
        .unwrap_err();
    match err {
        OrderError::InsufficientStock {
            item_id,
            available,
            requested,
        } => {
            assert_eq!(item_id, "banana");
            assert_eq!(available, 2);
            assert_eq!(requested, 5);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(stock_of(&manager, "banana"), 2);
    assert!(manager.list_for(&admin()).unwrap().is_empty());
}

#[test]
fn test_short_line_reserves_nothing() {
    let manager = create_test_manager();

    // The apple line alone would fit; the banana line cannot
    let err = manager
        .create(&buyer(), vec![line("apple", 3), line("banana", 5)])
        .unwrap_err();
    assert!(matches!(err, OrderError::InsufficientStock { .. }));

    assert_eq!(stock_of(&manager, "apple"), 10);
    assert_eq!(stock_of(&manager, "banana"), 2);
}

#[test]
fn test_duplicate_lines_checked_as_one_demand() {
    let manager = create_test_manager();

    // 6 + 6 of the same item must be checked against stock 10 as 12
    let err = manager
        .create(&buyer(), vec![line("apple", 6), line("apple", 6)])
        .unwrap_err();
    match err {
        OrderError::InsufficientStock {
            item_id,
            available,
            requested,
        } => {
            assert_eq!(item_id, "apple");
            assert_eq!(available, 10);
            assert_eq!(requested, 12);
        }
        other => panic!("unexpected error: {other}"),
    }

    // A fitting split keeps both lines and decrements the sum
    let order = manager
        .create(&buyer(), vec![line("apple", 6), line("apple", 4)])
        .unwrap();
    assert_eq!(order.lines.len(), 2);
    assert_eq!(stock_of(&manager, "apple"), 0);
}

#[test]
fn test_pay_and_cancel_unknown_order() {
    let manager = create_test_manager();

    let err = manager.pay(&buyer(), "missing").unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(id) if id == "missing"));

    let err = manager.cancel(&buyer(), "missing").unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(_)));
}

#[test]
fn test_pay_requires_owner_or_elevated() {
    let manager = create_test_manager();
    let order = manager.create(&buyer(), vec![line("apple", 1)]).unwrap();

    let err = manager.pay(&other_buyer(), &order.order_id).unwrap_err();
    match err {
        OrderError::Forbidden { actor_id, order_id } => {
            assert_eq!(actor_id, "buyer-2");
            assert_eq!(order_id, order.order_id);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Elevated actors may manage any order
    let paid = manager.pay(&admin(), &order.order_id).unwrap();
    assert_eq!(paid.outcome, TransitionOutcome::Paid);
}

#[test]
fn test_cancel_requires_owner_or_elevated() {
    let manager = create_test_manager();
    let order = manager.create(&buyer(), vec![line("apple", 2)]).unwrap();

    let err = manager.cancel(&other_buyer(), &order.order_id).unwrap_err();
    assert!(matches!(err, OrderError::Forbidden { .. }));
    // The rejected call moved no stock
    assert_eq!(stock_of(&manager, "apple"), 8);
}

#[test]
fn test_error_codes_for_boundary_layer() {
    let manager = create_test_manager();

    let err = manager.create(&buyer(), vec![]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmptyOrder);

    let err = manager
        .create(&buyer(), vec![line("banana", 5)])
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientStock);

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::InsufficientStock);
    let details = app.details.unwrap();
    assert_eq!(details["item_id"], "banana");
    assert_eq!(details["available"], 2);
    assert_eq!(details["requested"], 5);

    let err = manager.pay(&buyer(), "missing").unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderNotFound);
}
