use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use academy_core::errors::Error;
use academy_core::payments::InstructorPayment;

use crate::errors::StorageError;
use crate::utils::parse_money;

/// Database model for ledger entries.
///
/// The ledger is append-only, so the model carries no changeset. The covered
/// request ids are stored as a JSON array in a TEXT column.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::instructor_payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct InstructorPaymentDB {
    pub id: String,
    pub instructor_id: String,
    pub amount: String,
    pub request_ids: String,
    pub paid_by: String,
    pub paid_at: NaiveDateTime,
    pub notes: Option<String>,
}

impl TryFrom<InstructorPaymentDB> for InstructorPayment {
    type Error = Error;

    fn try_from(db: InstructorPaymentDB) -> Result<Self, Self::Error> {
        let request_ids: Vec<String> = serde_json::from_str(&db.request_ids).map_err(|e| {
            StorageError::SerializationError(format!(
                "payment '{}' holds an unparseable request id list: {}",
                db.id, e
            ))
        })?;

        Ok(InstructorPayment {
            amount: parse_money(&db.amount, "amount")?,
            request_ids,
            id: db.id,
            instructor_id: db.instructor_id,
            paid_by: db.paid_by,
            paid_at: db.paid_at,
            notes: db.notes,
        })
    }
}
