//! Order workflow integration tests
//!
//! Covers the fulfillment state machine: exchange-code lifecycle, the
//! completion handshake and the successor-only transition rule.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{DeliveryType, Order, OrderStatus, Party};
use supplier_marketplace_backend::error::AppError;
use supplier_marketplace_backend::services::orders::{
    advance, complete_with_handshake, next_action, NextAction, Role,
};

fn mk_order(status: OrderStatus, exchange_code: Option<&str>) -> Order {
    Order {
        id: Uuid::new_v4(),
        supplier: Party {
            name: "Karnataka Growers".to_string(),
            phone: "9812345670".to_string(),
        },
        buyer: Party {
            name: "Asha Verma".to_string(),
            phone: "9876543210".to_string(),
        },
        product: "Basmati rice".to_string(),
        quantity: "25 kg".to_string(),
        total_price: Decimal::from(1850),
        status,
        delivery_type: DeliveryType::Delivery,
        delivery_address: Some("12, MG Road, Mumbai".to_string()),
        exchange_code: exchange_code.map(str::to_string),
        order_date: Utc::now(),
    }
}

const ALL_STATUSES: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Completed,
];

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_exchange_code_null_until_processing() {
    let pending = mk_order(OrderStatus::Pending, None);
    assert!(pending.exchange_code.is_none());

    let confirmed = advance(&pending, OrderStatus::Confirmed).unwrap();
    assert!(confirmed.exchange_code.is_none());

    let processing = advance(&confirmed, OrderStatus::Processing).unwrap();
    let code = processing.exchange_code.clone().expect("code generated");
    assert_eq!(code.len(), 6);
    assert!(code
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
}

#[test]
fn test_exchange_code_identical_on_every_subsequent_read() {
    let confirmed = mk_order(OrderStatus::Confirmed, None);
    let processing = advance(&confirmed, OrderStatus::Processing).unwrap();
    let code = processing.exchange_code.clone().unwrap();

    let shipped = advance(&processing, OrderStatus::Shipped).unwrap();
    assert_eq!(shipped.exchange_code.as_deref(), Some(code.as_str()));

    let completed = complete_with_handshake(&shipped, &code).unwrap();
    assert_eq!(completed.exchange_code.as_deref(), Some(code.as_str()));
    assert_eq!(completed.status, OrderStatus::Completed);
}

#[test]
fn test_handshake_rejects_wrong_code_and_leaves_order_unchanged() {
    let shipped = mk_order(OrderStatus::Shipped, Some("AB12CD"));

    for wrong in ["ab12cd", "AB12C", "AB12CDX", "", "XXXXXX"] {
        let err = complete_with_handshake(&shipped, wrong).unwrap_err();
        assert!(
            matches!(err, AppError::ExchangeCodeMismatch),
            "expected mismatch for {:?}",
            wrong
        );
    }

    // Copy-on-write: the input order is untouched
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.exchange_code.as_deref(), Some("AB12CD"));
}

#[test]
fn test_handshake_requires_shipped_status() {
    let processing = mk_order(OrderStatus::Processing, Some("AB12CD"));
    let err = complete_with_handshake(&processing, "AB12CD").unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));
}

#[test]
fn test_advance_rejects_skipping_statuses() {
    let pending = mk_order(OrderStatus::Pending, None);
    let err = advance(&pending, OrderStatus::Shipped).unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));

    let err = advance(&pending, OrderStatus::Completed).unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));
}

#[test]
fn test_advance_rejects_backwards_and_self_transitions() {
    let shipped = mk_order(OrderStatus::Shipped, Some("AB12CD"));
    for target in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
    ] {
        assert!(advance(&shipped, target).is_err());
    }
}

#[test]
fn test_advance_changes_only_the_status() {
    let confirmed = mk_order(OrderStatus::Confirmed, None);
    let processing = advance(&confirmed, OrderStatus::Processing).unwrap();

    assert_eq!(processing.id, confirmed.id);
    assert_eq!(processing.product, confirmed.product);
    assert_eq!(processing.quantity, confirmed.quantity);
    assert_eq!(processing.total_price, confirmed.total_price);
    assert_eq!(processing.delivery_address, confirmed.delivery_address);
    assert_eq!(processing.order_date, confirmed.order_date);
}

#[test]
fn test_seller_next_actions() {
    let cases = [
        (OrderStatus::Pending, None),
        (OrderStatus::Confirmed, Some(NextAction::MarkProcessing)),
        (OrderStatus::Processing, Some(NextAction::MarkShipped)),
        (OrderStatus::Shipped, Some(NextAction::CompleteWithCode)),
        (OrderStatus::Completed, None),
    ];
    for (status, expected) in cases {
        let order = mk_order(status, None);
        assert_eq!(next_action(&order, Role::Seller), expected);
    }
}

#[test]
fn test_buyer_next_actions() {
    let cases = [
        (OrderStatus::Pending, None),
        (OrderStatus::Confirmed, None),
        (OrderStatus::Processing, Some(NextAction::ViewExchangeCode)),
        (OrderStatus::Shipped, Some(NextAction::ViewExchangeCode)),
        (OrderStatus::Completed, Some(NextAction::AddReview)),
    ];
    for (status, expected) in cases {
        let order = mk_order(status, None);
        assert_eq!(next_action(&order, Role::Buyer), expected);
    }
}

#[test]
fn test_exchange_code_invariant_tracks_status() {
    // Walk the full lifecycle and check the presence invariant at each step.
    let mut order = mk_order(OrderStatus::Pending, None);
    loop {
        assert_eq!(
            order.exchange_code.is_some(),
            order.status.carries_exchange_code(),
            "invariant violated at {}",
            order.status.as_str()
        );
        let Some(target) = order.status.successor() else {
            break;
        };
        order = if target == OrderStatus::Completed {
            let code = order.exchange_code.clone().unwrap();
            complete_with_handshake(&order, &code).unwrap()
        } else {
            advance(&order, target).unwrap()
        };
    }
    assert_eq!(order.status, OrderStatus::Completed);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn status_strategy() -> impl Strategy<Value = OrderStatus> {
    prop::sample::select(ALL_STATUSES.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// advance succeeds exactly for the immediate successor
    #[test]
    fn prop_advance_accepts_only_successor(
        current in status_strategy(),
        target in status_strategy()
    ) {
        let code = current.carries_exchange_code().then(|| "AB12CD");
        let order = mk_order(current, code);
        let outcome = advance(&order, target);

        if current.successor() == Some(target) {
            prop_assert!(outcome.is_ok());
            prop_assert_eq!(outcome.unwrap().status, target);
        } else {
            prop_assert!(outcome.is_err());
        }
    }

    /// The handshake succeeds iff the supplied code matches exactly
    #[test]
    fn prop_handshake_exact_match_only(supplied in "[A-Za-z0-9]{0,8}") {
        let order = mk_order(OrderStatus::Shipped, Some("QW3RT9"));
        let outcome = complete_with_handshake(&order, &supplied);

        if supplied == "QW3RT9" {
            prop_assert!(outcome.is_ok());
            prop_assert_eq!(outcome.unwrap().status, OrderStatus::Completed);
        } else {
            prop_assert!(matches!(outcome, Err(AppError::ExchangeCodeMismatch)));
            prop_assert_eq!(order.status, OrderStatus::Shipped);
        }
    }

    /// Generated codes always fit the fixed shape
    #[test]
    fn prop_generated_codes_are_six_uppercase_alphanumerics(_seed in 0u8..255) {
        let confirmed = mk_order(OrderStatus::Confirmed, None);
        let processing = advance(&confirmed, OrderStatus::Processing).unwrap();
        let code = processing.exchange_code.unwrap();
        prop_assert_eq!(code.len(), 6);
        prop_assert!(code.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }
}
