use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::catalog_model::{NewService, Service, ServiceUpdate};
use super::catalog_traits::{CatalogServiceTrait, ServiceRepositoryTrait};
use crate::errors::Result;
use crate::users::RoleResolverTrait;

/// Service for managing the catalog of bookable offerings.
pub struct CatalogService {
    repository: Arc<dyn ServiceRepositoryTrait>,
    roles: Arc<dyn RoleResolverTrait>,
}

impl CatalogService {
    pub fn new(
        repository: Arc<dyn ServiceRepositoryTrait>,
        roles: Arc<dyn RoleResolverTrait>,
    ) -> Self {
        CatalogService { repository, roles }
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    fn get_service(&self, service_id: &str) -> Result<Service> {
        self.repository.get_by_id(service_id)
    }

    fn list_services(&self) -> Result<Vec<Service>> {
        self.repository.list()
    }

    async fn create_service(&self, actor_id: &str, new_service: NewService) -> Result<Service> {
        self.roles.ensure_manager(actor_id)?;
        new_service.validate()?;
        let created = self.repository.create(new_service).await?;
        info!("service '{}' created by '{}'", created.id, actor_id);
        Ok(created)
    }

    async fn update_service(&self, actor_id: &str, update: ServiceUpdate) -> Result<Service> {
        self.roles.ensure_manager(actor_id)?;
        update.validate()?;
        let updated = self.repository.update(update).await?;
        info!("service '{}' updated by '{}'", updated.id, actor_id);
        Ok(updated)
    }

    async fn delete_service(&self, actor_id: &str, service_id: &str) -> Result<()> {
        self.roles.ensure_manager(actor_id)?;
        self.repository.delete(service_id).await?;
        info!("service '{}' deleted by '{}'", service_id, actor_id);
        Ok(())
    }
}
