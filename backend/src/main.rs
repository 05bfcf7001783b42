//! Supplier Marketplace Platform - Backend Server
//!
//! Connects suppliers and buyers around order fulfillment, profile
//! completeness and address resolution.

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supplier_marketplace_backend::{
    create_app,
    external::{FixedLocationSensor, NominatimClient},
    services::{AccountService, AddressResolver},
    store::MemoryStore,
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smp_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Supplier Marketplace Server");
    tracing::info!("Environment: {}", config.environment);

    // External collaborators
    let geocoder = Arc::new(NominatimClient::new(
        config.geocoding.base_url.clone(),
        Duration::from_secs(config.geocoding.timeout_secs),
    )?);
    let sensor = Arc::new(FixedLocationSensor::from_config(&config.location));

    let resolver = AddressResolver::new(
        geocoder,
        sensor,
        &config.geocoding,
        &config.resolver,
        &config.location,
    );

    // Persistence collaborator (in-memory stand-in)
    let store = Arc::new(MemoryStore::new());
    let accounts = AccountService::new(store.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        orders: store.clone(),
        profiles: store,
        resolver,
        accounts,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
