//! Catalog module - the bookable service offerings.

mod catalog_model;
mod catalog_service;
mod catalog_traits;


// Re-export the public interface
pub use catalog_model::{NewService, Service, ServiceUpdate};
pub use catalog_service::CatalogService;
pub use catalog_traits::{CatalogServiceTrait, ServiceRepositoryTrait};
