//! Account profile models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// Postal address attached to a profile.
///
/// `geolocation` is filled in by the address resolver when geocoding
/// succeeds; it is never required for profile completeness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub geolocation: Option<GpsCoordinates>,
}

/// An account profile on the platform.
///
/// `is_supplier` and `is_vendor` are independent role flags; an account may
/// hold both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub fullname: String,
    /// Display name
    pub name: String,
    pub phone: String,
    pub address: Address,
    pub is_supplier: bool,
    pub is_vendor: bool,
}

impl Profile {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            fullname: String::new(),
            name: String::new(),
            phone: String::new(),
            address: Address::default(),
            is_supplier: false,
            is_vendor: false,
        }
    }
}
