//! Order fulfillment workflow
//!
//! Pure state machine over `OrderStatus`. Transitions return a new order
//! value for the caller to merge into its own collection; nothing here
//! performs I/O or mutates shared state. Completion is gated by the
//! exchange-code handshake: the seller must present the code the buyer
//! holds before an order can reach `Completed`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::{Order, OrderStatus};

use crate::error::{AppError, AppResult};

/// Length of the per-order exchange code
const EXCHANGE_CODE_LEN: usize = 6;

/// Uppercase alphanumeric alphabet for exchange codes
const EXCHANGE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Acting role when computing the next workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seller,
    Buyer,
}

impl Role {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "seller" => Some(Role::Seller),
            "buyer" => Some(Role::Buyer),
            _ => None,
        }
    }
}

/// The legal next step for an order, as shown on the order card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    /// Seller: confirmed order moves into preparation
    MarkProcessing,
    /// Seller: processed order goes out for delivery
    MarkShipped,
    /// Seller: completion attempt, requires the buyer's exchange code
    CompleteWithCode,
    /// Buyer: read-only view of the exchange code, no state change
    ViewExchangeCode,
    /// Buyer: leave a review on a completed order
    AddReview,
}

impl NextAction {
    /// Button label for the order card
    pub fn label(&self) -> &'static str {
        match self {
            NextAction::MarkProcessing => "Mark as Processing",
            NextAction::MarkShipped => "Mark as Shipped",
            NextAction::CompleteWithCode => "Mark as Completed",
            NextAction::ViewExchangeCode => "View Exchange Code",
            NextAction::AddReview => "Add Review",
        }
    }

    /// Target status when the action is an unconditional transition.
    ///
    /// `CompleteWithCode` is a gated attempt, not a transition, and the
    /// read-only buyer actions change nothing, so all three return `None`.
    pub fn target(&self) -> Option<OrderStatus> {
        match self {
            NextAction::MarkProcessing => Some(OrderStatus::Processing),
            NextAction::MarkShipped => Some(OrderStatus::Shipped),
            NextAction::CompleteWithCode
            | NextAction::ViewExchangeCode
            | NextAction::AddReview => None,
        }
    }
}

/// Compute the next legal action for an order as seen by `role`
pub fn next_action(order: &Order, role: Role) -> Option<NextAction> {
    match role {
        Role::Seller => seller_action(order.status),
        Role::Buyer => buyer_action(order.status),
    }
}

fn seller_action(status: OrderStatus) -> Option<NextAction> {
    match status {
        OrderStatus::Confirmed => Some(NextAction::MarkProcessing),
        OrderStatus::Processing => Some(NextAction::MarkShipped),
        OrderStatus::Shipped => Some(NextAction::CompleteWithCode),
        OrderStatus::Pending | OrderStatus::Completed => None,
    }
}

fn buyer_action(status: OrderStatus) -> Option<NextAction> {
    match status {
        OrderStatus::Processing | OrderStatus::Shipped => Some(NextAction::ViewExchangeCode),
        OrderStatus::Completed => Some(NextAction::AddReview),
        OrderStatus::Pending | OrderStatus::Confirmed => None,
    }
}

/// Advance an order to `target`, returning the new order value.
///
/// Rejects any target that is not the immediate successor of the current
/// status. The first transition into `Processing` generates the exchange
/// code; it is never regenerated afterwards.
pub fn advance(order: &Order, target: OrderStatus) -> AppResult<Order> {
    if order.status.successor() != Some(target) {
        return Err(AppError::InvalidStateTransition(format!(
            "Cannot move order from {} to {}",
            order.status.as_str(),
            target.as_str()
        )));
    }

    let mut updated = order.clone();
    updated.status = target;

    if target == OrderStatus::Processing && updated.exchange_code.is_none() {
        updated.exchange_code = Some(generate_exchange_code());
        tracing::info!(order_id = %order.id, "exchange code generated");
    }

    Ok(updated)
}

/// Complete a shipped order by presenting the buyer's exchange code.
///
/// The code must match exactly (case-sensitive). On mismatch the order is
/// left unchanged and the caller gets `ExchangeCodeMismatch`, distinct from
/// a transition error.
pub fn complete_with_handshake(order: &Order, supplied_code: &str) -> AppResult<Order> {
    if order.status != OrderStatus::Shipped {
        return Err(AppError::InvalidStateTransition(format!(
            "Only shipped orders can be completed, order is {}",
            order.status.as_str()
        )));
    }

    match &order.exchange_code {
        Some(code) if code == supplied_code => advance(order, OrderStatus::Completed),
        _ => Err(AppError::ExchangeCodeMismatch),
    }
}

/// Generate a short uppercase alphanumeric exchange code.
///
/// A local, per-order shared secret exchanged in person at delivery, not a
/// global identifier; no centralized uniqueness needed.
pub fn generate_exchange_code() -> String {
    let mut rng = rand::thread_rng();
    (0..EXCHANGE_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..EXCHANGE_CODE_CHARSET.len());
            EXCHANGE_CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_code_shape() {
        for _ in 0..50 {
            let code = generate_exchange_code();
            assert_eq!(code.len(), EXCHANGE_CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(NextAction::MarkProcessing.label(), "Mark as Processing");
        assert_eq!(NextAction::CompleteWithCode.label(), "Mark as Completed");
        assert_eq!(NextAction::ViewExchangeCode.label(), "View Exchange Code");
    }

    #[test]
    fn test_completion_attempt_has_no_unconditional_target() {
        assert_eq!(NextAction::CompleteWithCode.target(), None);
        assert_eq!(
            NextAction::MarkShipped.target(),
            Some(OrderStatus::Shipped)
        );
    }
}
