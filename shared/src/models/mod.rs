//! Domain models for the Supplier Marketplace Platform

mod location;
mod order;
mod profile;

pub use location::*;
pub use order::*;
pub use profile::*;
