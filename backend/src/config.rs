//! Configuration management for the Supplier Marketplace Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SMP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Geocoding provider configuration
    pub geocoding: GeocodingConfig,

    /// Address resolver configuration
    pub resolver: ResolverConfig,

    /// Device location configuration
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Base URL of the upstream geocoding provider
    pub base_url: String,

    /// ISO country code filter for forward lookups
    pub country_code: String,

    /// Request timeout in seconds; non-response past this is a failure
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Quiet period after the last city keystroke before a lookup is issued
    pub city_debounce_ms: u64,

    /// Shorter quiet period for state-field changes when a city is present
    pub state_debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    /// Hard timeout for a one-shot position request, in seconds
    pub timeout_secs: u64,

    /// Maximum tolerated staleness of a cached position, in seconds
    pub max_age_secs: u64,

    /// Request high-accuracy positioning from the sensor
    pub high_accuracy: bool,

    /// Pinned latitude for deployments without a live sensor
    pub fixed_lat: Option<f64>,

    /// Pinned longitude for deployments without a live sensor
    pub fixed_lng: Option<f64>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SMP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("geocoding.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.country_code", "in")?
            .set_default("geocoding.timeout_secs", 15)?
            .set_default("resolver.city_debounce_ms", 1000)?
            .set_default("resolver.state_debounce_ms", 500)?
            .set_default("location.timeout_secs", 10)?
            .set_default("location.max_age_secs", 300)?
            .set_default("location.high_accuracy", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SMP_ prefix)
            .add_source(
                Environment::with_prefix("SMP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
