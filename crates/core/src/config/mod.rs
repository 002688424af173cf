//! Financial configuration module - the rates/percentages singleton.

mod config_model;
mod config_service;
mod config_traits;


// Re-export the public interface
pub use config_model::{FinancialConfig, FinancialConfigUpdate};
pub use config_service::ConfigService;
pub use config_traits::{ConfigServiceTrait, FinancialConfigRepositoryTrait};
