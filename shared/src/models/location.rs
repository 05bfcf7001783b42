//! Transient geocoding results.
//!
//! Created per resolution attempt and either discarded or folded into
//! `Profile::address` by the caller; never persisted independently.

use serde::{Deserialize, Serialize};

/// Outcome of a forward geocoding lookup (place name → coordinates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub lat: f64,
    pub lng: f64,
    pub city: String,
    pub state: String,
    pub country: String,
    /// Full human-readable description from the upstream provider
    pub display_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolvedLocation {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            city: String::new(),
            state: String::new(),
            country: String::new(),
            display_name: String::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Outcome of a reverse geocoding lookup (coordinates → address)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub lat: f64,
    pub lng: f64,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub display_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolvedAddress {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            street: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            pincode: String::new(),
            display_name: String::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}
