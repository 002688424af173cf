//! Instructor payment repository and service traits.

use async_trait::async_trait;

use super::payments_model::{InstructorBalance, InstructorPayment, SettlementItem};
use crate::errors::Result;

/// Trait defining the contract for ledger persistence.
///
/// The ledger is append-only: there is deliberately no update or delete
/// operation.
#[async_trait]
pub trait InstructorPaymentRepositoryTrait: Send + Sync {
    /// Ledger history for one instructor, newest first.
    fn list_for_instructor(&self, instructor_id: &str) -> Result<Vec<InstructorPayment>>;

    /// The latest entries across all instructors, newest first.
    fn list_recent(&self, limit: i64) -> Result<Vec<InstructorPayment>>;

    /// Settles a batch in one transaction: marks each item's request paid
    /// where it is still completed, unpaid, and assigned to `instructor_id`;
    /// sums the payouts of the rows actually marked; appends one ledger
    /// entry naming exactly those rows.
    ///
    /// Items lost to a concurrent settlement drop out of the batch. When
    /// nothing remains the transaction writes nothing and errors with
    /// `RequestError::NothingToSettle`.
    async fn settle(
        &self,
        instructor_id: &str,
        items: &[SettlementItem],
        paid_by: &str,
        notes: Option<&str>,
    ) -> Result<InstructorPayment>;
}

/// Trait defining the contract for payout reporting and settlement.
#[async_trait]
pub trait SettlementServiceTrait: Send + Sync {
    /// All instructors' outstanding balances. Founder-gated.
    async fn outstanding_balances(&self, actor_id: &str) -> Result<Vec<InstructorBalance>>;

    /// One instructor's outstanding balance. Founder or the instructor
    /// themself.
    async fn outstanding_for(
        &self,
        actor_id: &str,
        instructor_id: &str,
    ) -> Result<InstructorBalance>;

    /// Pays out everything currently completed and unpaid for one
    /// instructor. Founder-gated.
    async fn settle_instructor(
        &self,
        actor_id: &str,
        instructor_id: &str,
        notes: Option<&str>,
    ) -> Result<InstructorPayment>;

    /// Ledger history for one instructor. Founder or the instructor
    /// themself.
    fn list_payments(&self, actor_id: &str, instructor_id: &str) -> Result<Vec<InstructorPayment>>;

    /// The latest ledger entries across all instructors. Founder-gated.
    fn recent_payments(&self, actor_id: &str, limit: Option<i64>) -> Result<Vec<InstructorPayment>>;
}
