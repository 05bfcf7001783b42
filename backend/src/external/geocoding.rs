//! Geocoding API client for forward and reverse address resolution
//!
//! Integrates with a Nominatim-compatible upstream for place search and
//! reverse lookups

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// City-level granularity for reverse lookups
const REVERSE_ZOOM: u8 = 10;

/// A single forward geocoding hit
#[derive(Debug, Clone)]
pub struct ForwardHit {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

/// A reverse geocoding hit with its structured address fields
#[derive(Debug, Clone, Default)]
pub struct ReverseHit {
    pub display_name: String,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
    pub house_number: Option<String>,
    pub road: Option<String>,
}

/// Upstream geocoding capability, injectable so tests can substitute a fake
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Forward-geocode free text to at most one result, scoped to a country
    async fn forward(&self, query: &str, country_code: &str) -> AppResult<Option<ForwardHit>>;

    /// Reverse-geocode coordinates to an address at city-level zoom
    async fn reverse(&self, lat: f64, lng: f64) -> AppResult<Option<ReverseHit>>;
}

/// Geocoding client for a Nominatim-compatible provider
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// Nominatim search response entry
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Nominatim reverse response
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
    address: Option<NominatimAddress>,
    /// Set instead of an address when the coordinates cannot be geocoded
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    suburb: Option<String>,
    state: Option<String>,
    country: Option<String>,
    postcode: Option<String>,
    house_number: Option<String>,
    road: Option<String>,
}

impl NominatimClient {
    /// Create a new NominatimClient
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("smp-server/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Create a new NominatimClient with a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> AppResult<Self> {
        Self::new(base_url, Duration::from_secs(15))
    }

    fn parse_coordinate(raw: &str, field: &str) -> AppResult<f64> {
        raw.parse::<f64>().map_err(|e| {
            AppError::ExternalService(format!("Invalid {} in geocoding response: {}", field, e))
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn forward(&self, query: &str, country_code: &str) -> AppResult<Option<ForwardHit>> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", country_code),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Geocoding API error: {} - {}",
                status, body
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse geocoding response: {}", e))
        })?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(ForwardHit {
            lat: Self::parse_coordinate(&place.lat, "latitude")?,
            lng: Self::parse_coordinate(&place.lon, "longitude")?,
            display_name: place.display_name,
        }))
    }

    async fn reverse(&self, lat: f64, lng: f64) -> AppResult<Option<ReverseHit>> {
        let url = format!("{}/reverse", self.base_url);
        let zoom = REVERSE_ZOOM.to_string();
        let lat_s = lat.to_string();
        let lng_s = lng.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat_s.as_str()),
                ("lon", lng_s.as_str()),
                ("format", "json"),
                ("zoom", zoom.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Reverse lookup failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Reverse geocoding API error: {} - {}",
                status, body
            )));
        }

        let data: NominatimReverse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse reverse response: {}", e))
        })?;

        if data.error.is_some() {
            return Ok(None);
        }

        let Some(address) = data.address else {
            return Ok(None);
        };

        Ok(Some(ReverseHit {
            display_name: data.display_name.unwrap_or_default(),
            city: address.city,
            town: address.town,
            village: address.village,
            suburb: address.suburb,
            state: address.state,
            country: address.country,
            postcode: address.postcode,
            house_number: address.house_number,
            road: address.road,
        }))
    }
}
