//! Service catalog repository and service traits.

use async_trait::async_trait;

use super::catalog_model::{NewService, Service, ServiceUpdate};
use crate::errors::Result;

/// Trait defining the contract for service offering persistence.
#[async_trait]
pub trait ServiceRepositoryTrait: Send + Sync {
    /// Retrieves a service offering by id.
    fn get_by_id(&self, service_id: &str) -> Result<Service>;

    /// Lists all service offerings.
    fn list(&self) -> Result<Vec<Service>>;

    /// Retrieves the offerings whose ids appear in `ids`. Missing ids are
    /// simply absent from the result; callers decide whether that matters.
    fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Service>>;

    /// Creates a service offering, generating an id when none is given.
    async fn create(&self, new_service: NewService) -> Result<Service>;

    /// Updates an existing service offering.
    async fn update(&self, update: ServiceUpdate) -> Result<Service>;

    /// Deletes a service offering. Requests referencing it are left in
    /// place; the reference is weak.
    async fn delete(&self, service_id: &str) -> Result<()>;
}

/// Trait defining the contract for catalog management.
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    /// Retrieves a service offering by id. Ungated; the catalog is public.
    fn get_service(&self, service_id: &str) -> Result<Service>;

    /// Lists all service offerings. Ungated.
    fn list_services(&self) -> Result<Vec<Service>>;

    /// Creates a service offering. Founder-gated.
    async fn create_service(&self, actor_id: &str, new_service: NewService) -> Result<Service>;

    /// Updates a service offering. Founder-gated.
    async fn update_service(&self, actor_id: &str, update: ServiceUpdate) -> Result<Service>;

    /// Deletes a service offering. Founder-gated. Existing requests keep
    /// their (now dangling) reference and can no longer be priced.
    async fn delete_service(&self, actor_id: &str, service_id: &str) -> Result<()>;
}
