//! Address resolution service
//!
//! Orchestrates input validation, debounced lookups, forward/reverse
//! geocoding and result shaping. Every failure crosses this boundary as a
//! typed `ResolvedLocation`/`ResolvedAddress` result, never as an error;
//! the caller decides whether to retry.

use std::sync::Arc;
use std::time::Duration;

use shared::{validate_city_name, ResolvedAddress, ResolvedLocation};

use crate::config::{GeocodingConfig, LocationConfig, ResolverConfig};
use crate::external::geocoding::{Geocoder, ReverseHit};
use crate::external::location::{LocationError, LocationSensor, PositionOptions};
use crate::services::debounce::DebounceController;

/// Fallback country when the upstream omits one
const DEFAULT_COUNTRY: &str = "India";

/// Address resolution over an injected geocoder and location sensor
#[derive(Clone)]
pub struct AddressResolver {
    geocoder: Arc<dyn Geocoder>,
    sensor: Arc<dyn LocationSensor>,
    country_code: String,
    position_options: PositionOptions,
    city_debounce: Duration,
    state_debounce: Duration,
}

impl AddressResolver {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        sensor: Arc<dyn LocationSensor>,
        geocoding: &GeocodingConfig,
        resolver: &ResolverConfig,
        location: &LocationConfig,
    ) -> Self {
        Self {
            geocoder,
            sensor,
            country_code: geocoding.country_code.clone(),
            position_options: PositionOptions::from_config(location),
            city_debounce: Duration::from_millis(resolver.city_debounce_ms),
            state_debounce: Duration::from_millis(resolver.state_debounce_ms),
        }
    }

    /// Controller for a city text input (one per form field)
    pub fn city_debouncer(&self) -> DebounceController {
        DebounceController::new(self.city_debounce)
    }

    /// Controller for a state text input (shorter quiet period)
    pub fn state_debouncer(&self) -> DebounceController {
        DebounceController::new(self.state_debounce)
    }

    /// Forward-geocode free-text city/state input to coordinates.
    ///
    /// On success the input city is echoed back; the state falls back to a
    /// display-name heuristic when none was supplied.
    pub async fn resolve_forward(
        &self,
        city: &str,
        state: &str,
        country: &str,
    ) -> ResolvedLocation {
        let query = build_query(city, state, country);

        let hit = match self.geocoder.forward(&query, &self.country_code).await {
            Ok(Some(hit)) => hit,
            Ok(None) => return ResolvedLocation::failure("City not found"),
            Err(e) => {
                tracing::warn!(query = %query, "forward geocoding failed: {}", e);
                return ResolvedLocation::failure(e.to_string());
            }
        };

        let resolved_state = if state.trim().is_empty() {
            match state_from_display_name(&hit.display_name) {
                Some(s) => s,
                None => {
                    tracing::warn!(
                        display_name = %hit.display_name,
                        "could not infer state from display name; flag for manual review"
                    );
                    String::new()
                }
            }
        } else {
            state.trim().to_string()
        };

        let resolved_country = if country.trim().is_empty() {
            DEFAULT_COUNTRY.to_string()
        } else {
            country.trim().to_string()
        };

        ResolvedLocation {
            lat: hit.lat,
            lng: hit.lng,
            city: city.trim().to_string(),
            state: resolved_state,
            country: resolved_country,
            display_name: hit.display_name,
            success: true,
            error: None,
        }
    }

    /// Reverse-geocode coordinates into a displayable address
    pub async fn resolve_reverse(&self, lat: f64, lng: f64) -> ResolvedAddress {
        let hit = match self.geocoder.reverse(lat, lng).await {
            Ok(Some(hit)) => hit,
            Ok(None) => return ResolvedAddress::failure("Address not found"),
            Err(e) => {
                tracing::warn!(lat, lng, "reverse geocoding failed: {}", e);
                return ResolvedAddress::failure(e.to_string());
            }
        };

        let city = preferred_city(&hit);
        let street = synthesize_street(&hit, &city);

        ResolvedAddress {
            lat,
            lng,
            street,
            city,
            state: hit.state.clone().unwrap_or_default(),
            country: hit
                .country
                .clone()
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            pincode: hit.postcode.clone().unwrap_or_default(),
            display_name: hit.display_name,
            success: true,
            error: None,
        }
    }

    /// Acquire the device position and reverse-resolve it.
    ///
    /// Sensor failures map to fixed per-cause messages and are not retried;
    /// the timeout is enforced here even if the sensor misbehaves.
    pub async fn resolve_from_device(&self) -> ResolvedAddress {
        let options = self.position_options;

        let acquired = tokio::time::timeout(
            options.timeout,
            self.sensor.current_position(&options),
        )
        .await
        .unwrap_or(Err(LocationError::Timeout));

        match acquired {
            Ok(position) => {
                self.resolve_reverse(position.latitude, position.longitude)
                    .await
            }
            Err(e) => {
                tracing::warn!("device location failed: {}", e);
                ResolvedAddress::failure(e.to_string())
            }
        }
    }

    /// Debounced forward resolution for a city keystroke.
    ///
    /// Returns `None` when a newer keystroke superseded this attempt, either
    /// during the quiet period or while the lookup was in flight; the caller
    /// must discard a `None` outcome rather than fold it into form state.
    pub async fn resolve_city_input(
        &self,
        controller: &DebounceController,
        city: &str,
        state: &str,
        country: &str,
    ) -> Option<ResolvedLocation> {
        let generation = controller.begin();

        // Syntactic pre-filter; invalid text never reaches the network.
        if let Err(reason) = validate_city_name(city) {
            return Some(ResolvedLocation::failure(reason));
        }

        if !controller.quiet_elapsed(generation).await {
            return None;
        }

        let resolved = self.resolve_forward(city, state, country).await;

        if !controller.is_current(generation) {
            return None;
        }
        Some(resolved)
    }

    /// Debounced re-resolution after a state-field change.
    ///
    /// Only fires when a city is already present; uses the same
    /// supersede-on-new-input rule as the city path.
    pub async fn resolve_state_input(
        &self,
        controller: &DebounceController,
        city: &str,
        state: &str,
        country: &str,
    ) -> Option<ResolvedLocation> {
        let generation = controller.begin();

        if city.trim().is_empty() {
            return None;
        }

        if !controller.quiet_elapsed(generation).await {
            return None;
        }

        let resolved = self.resolve_forward(city, state, country).await;

        if !controller.is_current(generation) {
            return None;
        }
        Some(resolved)
    }
}

/// Build the upstream search query: "{city}[, {state}][, {country}]"
fn build_query(city: &str, state: &str, country: &str) -> String {
    let mut query = city.trim().to_string();
    if !state.trim().is_empty() {
        query.push_str(", ");
        query.push_str(state.trim());
    }
    if !country.trim().is_empty() {
        query.push_str(", ");
        query.push_str(country.trim());
    }
    query
}

/// Best-effort state extraction from a comma-delimited display name.
///
/// Heuristic: for "X, District, State, Country" layouts the state is the
/// segment immediately preceding the country. Not a guarantee; returns
/// `None` when the display name has fewer than 3 segments.
fn state_from_display_name(display_name: &str) -> Option<String> {
    let segments: Vec<&str> = display_name.split(',').map(str::trim).collect();
    if segments.len() < 3 {
        return None;
    }
    segments
        .get(segments.len() - 2)
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

/// First non-empty of city, town, village, suburb
fn preferred_city(hit: &ReverseHit) -> String {
    [&hit.city, &hit.town, &hit.village, &hit.suburb]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Comma-join house number, road and suburb into a street line.
///
/// The suburb is included only when distinct from the resolved city; the
/// result is empty when nothing is available.
fn synthesize_street(hit: &ReverseHit, city: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(number) = hit.house_number.as_deref() {
        if !number.is_empty() {
            parts.push(number);
        }
    }
    if let Some(road) = hit.road.as_deref() {
        if !road.is_empty() {
            parts.push(road);
        }
    }
    if let Some(suburb) = hit.suburb.as_deref() {
        if !suburb.is_empty() && suburb != city {
            parts.push(suburb);
        }
    }
    parts.join(", ")
}
