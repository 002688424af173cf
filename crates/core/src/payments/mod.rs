//! Payments module - payout reporting, settlement, and the ledger.

mod payments_model;
mod payments_traits;
mod settlement_service;


// Re-export the public interface
pub use payments_model::{InstructorBalance, InstructorPayment, SettlementItem};
pub use payments_traits::{InstructorPaymentRepositoryTrait, SettlementServiceTrait};
pub use settlement_service::SettlementService;
