//! Device location sensor integration
//!
//! One-shot position acquisition behind an injectable trait. Failures are
//! classified into fixed categories, each with its own user-facing message;
//! there is no automatic retry.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::LocationConfig;

/// A device position fix
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated accuracy in meters
    pub accuracy: f64,
}

/// Options for a one-shot position request
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Maximum tolerated staleness of a cached fix
    pub max_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            max_age: Duration::from_secs(300),
        }
    }
}

impl PositionOptions {
    pub fn from_config(config: &LocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: Duration::from_secs(config.timeout_secs),
            max_age: Duration::from_secs(config.max_age_secs),
        }
    }
}

/// Classified sensor failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied. Please allow location access and try again.")]
    PermissionDenied,

    #[error("Location information is unavailable.")]
    Unavailable,

    #[error("Location request timed out.")]
    Timeout,

    #[error("Unable to retrieve your location.")]
    Other(String),
}

/// One-shot device location capability
#[async_trait]
pub trait LocationSensor: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, LocationError>;
}

/// Sensor backed by a position pinned in configuration.
///
/// Server deployments have no live GPS; a kiosk or depot installation can
/// pin its coordinates instead. Without a pinned position every request
/// reports `Unavailable`.
pub struct FixedLocationSensor {
    position: Option<Position>,
}

impl FixedLocationSensor {
    pub fn from_config(config: &LocationConfig) -> Self {
        let position = match (config.fixed_lat, config.fixed_lng) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
                accuracy: 0.0,
            }),
            _ => None,
        };
        Self { position }
    }

    pub fn pinned(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Some(Position {
                latitude,
                longitude,
                accuracy: 0.0,
            }),
        }
    }
}

#[async_trait]
impl LocationSensor for FixedLocationSensor {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        self.position.ok_or(LocationError::Unavailable)
    }
}
