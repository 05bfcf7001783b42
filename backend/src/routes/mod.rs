//! Route definitions for the Supplier Marketplace Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Order workflow
        .nest("/orders", order_routes())
        // Address resolution
        .nest("/geocode", geocode_routes())
        // Profile and navigation gate
        .nest("/profiles", profile_routes())
}

/// Order workflow routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/next-action", get(handlers::get_next_action))
        .route("/:order_id/advance", post(handlers::advance_order))
        .route("/:order_id/complete", post(handlers::complete_order))
        .route("/:order_id/exchange-code", get(handlers::get_exchange_code))
}

/// Geocoding routes
fn geocode_routes() -> Router<AppState> {
    Router::new()
        .route("/forward", get(handlers::forward_geocode))
        .route("/reverse", get(handlers::reverse_geocode))
        .route("/device", get(handlers::device_geocode))
}

/// Profile routes
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:profile_id",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/:profile_id/completion", get(handlers::get_completion))
        .route("/:profile_id/views/:view", get(handlers::guard_view))
        .route("/:profile_id/password", post(handlers::change_password))
}
