use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::config_model::{FinancialConfig, FinancialConfigUpdate};
use super::config_traits::{ConfigServiceTrait, FinancialConfigRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::users::RoleResolverTrait;

/// Service for the financial configuration singleton.
///
/// The record is created lazily with defaults on first read, so callers can
/// always count on a configuration being present. The value is returned by
/// value and handed explicitly to the calculator and the settlement
/// aggregator; nothing reads the store behind the caller's back.
pub struct ConfigService {
    repository: Arc<dyn FinancialConfigRepositoryTrait>,
    roles: Arc<dyn RoleResolverTrait>,
}

impl ConfigService {
    pub fn new(
        repository: Arc<dyn FinancialConfigRepositoryTrait>,
        roles: Arc<dyn RoleResolverTrait>,
    ) -> Self {
        ConfigService { repository, roles }
    }
}

#[async_trait]
impl ConfigServiceTrait for ConfigService {
    async fn get_or_init(&self) -> Result<FinancialConfig> {
        match self.repository.get() {
            Ok(config) => Ok(config),
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                info!("no financial configuration found, writing defaults");
                self.repository.upsert(FinancialConfig::initial()).await
            }
            Err(e) => Err(e),
        }
    }

    async fn update(
        &self,
        actor_id: &str,
        update: FinancialConfigUpdate,
    ) -> Result<FinancialConfig> {
        self.roles.ensure_manager(actor_id)?;
        update.validate()?;
        let current = self.get_or_init().await?;
        let saved = self
            .repository
            .upsert(update.apply_to(&current, actor_id))
            .await?;
        info!("financial configuration updated by '{}'", actor_id);
        Ok(saved)
    }
}
