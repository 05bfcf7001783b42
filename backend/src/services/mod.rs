//! Business logic services for the Supplier Marketplace Platform

pub mod account;
pub mod debounce;
pub mod orders;
pub mod profile;
pub mod resolver;

pub use account::AccountService;
pub use debounce::DebounceController;
pub use resolver::AddressResolver;
