//! Pricing module - pure revenue/payout computations over explicit
//! configuration.

mod errors;
mod pricing_calculator;
mod pricing_model;


// Re-export the public interface
pub use errors::PricingError;
pub use pricing_calculator::{minimum_price_for_margin, quote};
pub use pricing_model::{EngagementTerms, PriceQuote, DEFAULT_PRICE_STEP};
