//! Order models for marketplace fulfillment

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DeliveryType;

/// Fulfillment status of an order.
///
/// Statuses are totally ordered by progression; there are no cycles and
/// no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// The status that immediately follows this one, if any
    pub fn successor(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Whether an order in this status carries an exchange code
    pub fn carries_exchange_code(&self) -> bool {
        matches!(
            self,
            OrderStatus::Processing | OrderStatus::Shipped | OrderStatus::Completed
        )
    }
}

/// Name/phone pair identifying one party to an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub phone: String,
}

/// A physical-goods order between a supplier and a buyer.
///
/// `exchange_code` is generated exactly once, the moment the order first
/// enters `Processing`, and is immutable thereafter. Invariant: the code is
/// present iff the status is `Processing`, `Shipped` or `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub supplier: Party,
    pub buyer: Party,
    pub product: String,
    pub quantity: String,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    pub delivery_address: Option<String>,
    pub exchange_code: Option<String>,
    pub order_date: DateTime<Utc>,
}
