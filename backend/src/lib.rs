//! Supplier Marketplace Platform - backend library
//!
//! A marketplace dashboard backend connecting suppliers and buyers around
//! fulfillment of physical-goods orders, gated by profile completeness,
//! with geocoding-assisted address entry.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use crate::services::{AccountService, AddressResolver};
use crate::store::{OrderStore, ProfileStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orders: Arc<dyn OrderStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub resolver: AddressResolver,
    pub accounts: AccountService,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Supplier Marketplace Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
