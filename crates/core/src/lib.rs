//! Academy Core - Domain entities, services, and traits.
//!
//! This crate contains the back-office business logic for the academy:
//! roles, financial configuration, pricing, the service request lifecycle,
//! and instructor payment settlement. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod payments;
pub mod pricing;
pub mod requests;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
