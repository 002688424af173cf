//! Financial configuration repository and service traits.

use async_trait::async_trait;

use super::config_model::{FinancialConfig, FinancialConfigUpdate};
use crate::errors::Result;

/// Trait defining the contract for configuration persistence.
#[async_trait]
pub trait FinancialConfigRepositoryTrait: Send + Sync {
    /// Reads the singleton record. Absence surfaces as a not-found database
    /// error; callers that want lazy creation match on it.
    fn get(&self) -> Result<FinancialConfig>;

    /// Creates or replaces the singleton record.
    async fn upsert(&self, config: FinancialConfig) -> Result<FinancialConfig>;
}

/// Trait defining the contract for reading and administering the
/// configuration.
#[async_trait]
pub trait ConfigServiceTrait: Send + Sync {
    /// Returns the configuration, writing [`FinancialConfig::initial`] first
    /// when no record exists yet.
    async fn get_or_init(&self) -> Result<FinancialConfig>;

    /// Replaces the configuration values. Founder-gated.
    async fn update(
        &self,
        actor_id: &str,
        update: FinancialConfigUpdate,
    ) -> Result<FinancialConfig>;
}
