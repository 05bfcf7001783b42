//! External API integrations

pub mod geocoding;
pub mod location;

pub use geocoding::{Geocoder, NominatimClient};
pub use location::{FixedLocationSensor, LocationSensor};
