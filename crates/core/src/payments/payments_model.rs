//! Instructor payment domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One settled payout, as recorded in the append-only ledger.
///
/// `request_ids` names exactly the requests this payment covered; `amount`
/// is the sum of their payouts at settlement time. Ledger entries are never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorPayment {
    pub id: String,
    pub instructor_id: String,
    pub amount: Decimal,
    pub request_ids: Vec<String>,
    pub paid_by: String,
    pub paid_at: NaiveDateTime,
    pub notes: Option<String>,
}

/// One request's contribution to a settlement batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementItem {
    pub request_id: String,
    pub payout: Decimal,
}

/// Outstanding completed-but-unpaid work for one instructor.
///
/// `request_count` and `total_owed` cover only requests that could be
/// priced. `unpriced_requests` counts the rest: completed requests whose
/// service no longer exists, which carry no payout until the reference is
/// repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorBalance {
    pub instructor_id: String,
    pub request_count: usize,
    pub total_owed: Decimal,
    pub unpriced_requests: usize,
}

impl InstructorBalance {
    pub fn empty(instructor_id: &str) -> Self {
        InstructorBalance {
            instructor_id: instructor_id.to_string(),
            request_count: 0,
            total_owed: Decimal::ZERO,
            unpriced_requests: 0,
        }
    }
}
