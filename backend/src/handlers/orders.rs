//! HTTP handlers for order workflow endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{Order, OrderStatus};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::orders::{self, NextAction, Role};
use crate::AppState;

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
}

/// List orders, optionally filtered by status
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status = match query.status.as_deref() {
        Some(s) => Some(OrderStatus::from_str(s).ok_or_else(|| AppError::Validation {
            field: "status".to_string(),
            message: format!("Unknown order status: {}", s),
        })?),
        None => None,
    };

    let orders = state.orders.list(status).await?;
    Ok(Json(orders))
}

/// Get an order by ID
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(order_id).await?;
    Ok(Json(order))
}

/// Query parameters for the next-action lookup
#[derive(Debug, Deserialize)]
pub struct NextActionQuery {
    pub role: String,
}

/// The proposed next step for an order card
#[derive(Debug, Serialize)]
pub struct NextActionResponse {
    pub action: Option<NextAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
}

/// Compute the next legal action for the acting role
pub async fn get_next_action(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Query(query): Query<NextActionQuery>,
) -> AppResult<Json<NextActionResponse>> {
    let role = Role::from_str(&query.role).ok_or_else(|| AppError::Validation {
        field: "role".to_string(),
        message: format!("Unknown role: {}", query.role),
    })?;

    let order = state.orders.get(order_id).await?;
    let action = orders::next_action(&order, role);

    Ok(Json(NextActionResponse {
        action,
        label: action.map(|a| a.label()),
    }))
}

/// Input for an unconditional transition
#[derive(Debug, Deserialize)]
pub struct AdvanceInput {
    pub target: OrderStatus,
}

/// Advance an order to its next status
pub async fn advance_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<AdvanceInput>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(order_id).await?;
    let updated = orders::advance(&order, input.target)?;
    state.orders.save(updated.clone()).await?;
    Ok(Json(updated))
}

/// Input for the completion handshake
#[derive(Debug, Deserialize)]
pub struct CompleteInput {
    pub code: String,
}

/// Complete a shipped order by presenting the buyer's exchange code
pub async fn complete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<CompleteInput>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(order_id).await?;
    let updated = orders::complete_with_handshake(&order, &input.code)?;
    state.orders.save(updated.clone()).await?;
    Ok(Json(updated))
}

/// Exchange code payload for the buyer's order view
#[derive(Debug, Serialize)]
pub struct ExchangeCodeResponse {
    pub exchange_code: String,
}

/// Read the exchange code (buyer side, no state change)
pub async fn get_exchange_code(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ExchangeCodeResponse>> {
    let order = state.orders.get(order_id).await?;

    match order.exchange_code {
        Some(exchange_code) => Ok(Json(ExchangeCodeResponse { exchange_code })),
        None => Err(AppError::InvalidStateTransition(format!(
            "Exchange code is not available while the order is {}",
            order.status.as_str()
        ))),
    }
}
