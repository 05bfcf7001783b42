//! HTTP handlers for geocoding endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{validate_city_name, ResolvedAddress, ResolvedLocation};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for forward geocoding
#[derive(Debug, Deserialize)]
pub struct ForwardQuery {
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

/// Forward-geocode a city/state pair.
///
/// Resolution failures come back as a `success: false` body, not an error
/// status; only malformed input is rejected outright.
pub async fn forward_geocode(
    State(state): State<AppState>,
    Query(query): Query<ForwardQuery>,
) -> AppResult<Json<ResolvedLocation>> {
    if let Err(message) = validate_city_name(&query.city) {
        return Err(AppError::Validation {
            field: "city".to_string(),
            message: message.to_string(),
        });
    }

    let resolved = state
        .resolver
        .resolve_forward(&query.city, &query.state, &query.country)
        .await;
    Ok(Json(resolved))
}

/// Query parameters for reverse geocoding
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Reverse-geocode coordinates to an address
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseQuery>,
) -> AppResult<Json<ResolvedAddress>> {
    let resolved = state.resolver.resolve_reverse(query.lat, query.lng).await;
    Ok(Json(resolved))
}

/// Resolve the device position to an address
pub async fn device_geocode(State(state): State<AppState>) -> AppResult<Json<ResolvedAddress>> {
    let resolved = state.resolver.resolve_from_device().await;
    Ok(Json(resolved))
}
