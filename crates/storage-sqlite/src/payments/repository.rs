use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::model::InstructorPaymentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::instructor_payments;
use crate::schema::instructor_payments::dsl::*;
use crate::schema::service_requests;
use crate::utils::now_micros;
use academy_core::errors::{Error, Result};
use academy_core::payments::{InstructorPayment, InstructorPaymentRepositoryTrait, SettlementItem};
use academy_core::requests::{RequestError, RequestStatus};

pub struct InstructorPaymentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InstructorPaymentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        InstructorPaymentRepository { pool, writer }
    }
}

#[async_trait]
impl InstructorPaymentRepositoryTrait for InstructorPaymentRepository {
    fn list_for_instructor(&self, instructor_id_param: &str) -> Result<Vec<InstructorPayment>> {
        let mut conn = get_connection(&self.pool)?;
        let payments_db = instructor_payments
            .filter(instructor_id.eq(instructor_id_param))
            .order((paid_at.desc(), id.desc()))
            .load::<InstructorPaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        payments_db
            .into_iter()
            .map(InstructorPayment::try_from)
            .collect()
    }

    fn list_recent(&self, limit: i64) -> Result<Vec<InstructorPayment>> {
        let mut conn = get_connection(&self.pool)?;
        let payments_db = instructor_payments
            .order((paid_at.desc(), id.desc()))
            .limit(limit)
            .load::<InstructorPaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        payments_db
            .into_iter()
            .map(InstructorPayment::try_from)
            .collect()
    }

    async fn settle(
        &self,
        instructor_id_param: &str,
        items: &[SettlementItem],
        paid_by_param: &str,
        notes_param: Option<&str>,
    ) -> Result<InstructorPayment> {
        let instructor_owned = instructor_id_param.to_string();
        let items_owned = items.to_vec();
        let paid_by_owned = paid_by_param.to_string();
        let notes_owned = notes_param.map(str::to_string);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<InstructorPayment> {
                let mut confirmed: Vec<String> = Vec::with_capacity(items_owned.len());
                let mut total = Decimal::ZERO;

                // Mark each request paid only where it is still completed,
                // unpaid, and held by this instructor. Items lost to a
                // concurrent settlement miss the condition and drop out.
                for item in &items_owned {
                    let affected = diesel::update(
                        service_requests::table
                            .filter(service_requests::id.eq(item.request_id.as_str()))
                            .filter(
                                service_requests::status
                                    .eq(RequestStatus::Completed.as_str()),
                            )
                            .filter(service_requests::is_paid.eq(false))
                            .filter(
                                service_requests::assigned_to.eq(instructor_owned.as_str()),
                            ),
                    )
                    .set(service_requests::is_paid.eq(true))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                    if affected == 1 {
                        total += item.payout;
                        confirmed.push(item.request_id.clone());
                    } else {
                        warn!(
                            "request '{}' dropped out of settlement for '{}'",
                            item.request_id, instructor_owned
                        );
                    }
                }

                if confirmed.is_empty() {
                    // Nothing was marked. The typed error rolls the
                    // transaction back, leaving no ledger entry behind.
                    return Err(Error::Request(RequestError::NothingToSettle(
                        instructor_owned.clone(),
                    )));
                }

                let payment_db = InstructorPaymentDB {
                    id: Uuid::new_v4().to_string(),
                    instructor_id: instructor_owned.clone(),
                    amount: total.to_string(),
                    request_ids: serde_json::to_string(&confirmed)
                        .map_err(|e| StorageError::SerializationError(e.to_string()))?,
                    paid_by: paid_by_owned.clone(),
                    paid_at: now_micros(),
                    notes: notes_owned.clone(),
                };

                diesel::insert_into(instructor_payments)
                    .values(&payment_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                payment_db.try_into()
            })
            .await
    }
}
