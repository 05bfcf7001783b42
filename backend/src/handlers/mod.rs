//! HTTP handlers for the Supplier Marketplace Platform

pub mod geocode;
pub mod orders;
pub mod profiles;

pub use geocode::*;
pub use orders::*;
pub use profiles::*;
