use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::ServiceRequestDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::service_requests;
use crate::schema::service_requests::dsl::*;
use crate::utils::now_micros;
use academy_core::errors::{Error, Result};
use academy_core::requests::{
    decode_cursor, encode_cursor, NewServiceRequest, RequestError, RequestFilter, RequestPage,
    RequestStatus, ServiceRequest, ServiceRequestRepositoryTrait,
};

pub struct ServiceRequestRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ServiceRequestRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ServiceRequestRepository { pool, writer }
    }
}

/// Reads one row and reassembles the lifecycle union. Shared by the pool
/// reads and the precondition re-reads inside writer jobs.
fn load_row(conn: &mut SqliteConnection, request_id: &str) -> Result<ServiceRequest> {
    let row = service_requests::table
        .find(request_id)
        .first::<ServiceRequestDB>(conn)
        .map_err(StorageError::from)?;
    row.try_into()
}

#[async_trait]
impl ServiceRequestRepositoryTrait for ServiceRequestRepository {
    fn get_by_id(&self, request_id: &str) -> Result<ServiceRequest> {
        let mut conn = get_connection(&self.pool)?;
        load_row(&mut conn, request_id)
    }

    fn list(
        &self,
        filter: &RequestFilter,
        cursor: Option<&str>,
        limit: i64,
    ) -> Result<RequestPage> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = service_requests::table.into_boxed();

        if let Some(wanted) = filter.status {
            query = query.filter(status.eq(wanted.as_str()));
        }
        if let Some(assignee) = &filter.assigned_to {
            query = query.filter(assigned_to.eq(assignee.as_str()));
        }
        if let Some(paid) = filter.is_paid {
            query = query.filter(is_paid.eq(paid));
        }
        if let Some(cursor_str) = cursor {
            let (after_at, after_id) = decode_cursor(cursor_str)?;
            query = query.filter(
                created_at
                    .lt(after_at)
                    .or(created_at.eq(after_at).and(id.lt(after_id))),
            );
        }

        let rows = query
            .order((created_at.desc(), id.desc()))
            .limit(limit)
            .load::<ServiceRequestDB>(&mut conn)
            .map_err(StorageError::from)?;

        // A short page means the listing is exhausted. A full page may have
        // more behind it, so hand out a cursor at the last row.
        let full_page = rows.len() as i64 == limit;
        let mut requests = Vec::with_capacity(rows.len());
        for row in rows {
            requests.push(ServiceRequest::try_from(row)?);
        }
        let next_cursor = if full_page {
            requests
                .last()
                .map(|request| encode_cursor(request.created_at, &request.id))
        } else {
            None
        };

        Ok(RequestPage {
            requests,
            next_cursor,
        })
    }

    fn list_unpaid_completed(&self, instructor_id: &str) -> Result<Vec<ServiceRequest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = service_requests::table
            .filter(status.eq(RequestStatus::Completed.as_str()))
            .filter(is_paid.eq(false))
            .filter(assigned_to.eq(instructor_id))
            .order(created_at.asc())
            .load::<ServiceRequestDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(ServiceRequest::try_from).collect()
    }

    fn list_all_unpaid_completed(&self) -> Result<Vec<ServiceRequest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = service_requests::table
            .filter(status.eq(RequestStatus::Completed.as_str()))
            .filter(is_paid.eq(false))
            .order(created_at.asc())
            .load::<ServiceRequestDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(ServiceRequest::try_from).collect()
    }

    async fn insert(
        &self,
        new_request: NewServiceRequest,
        created_by_param: &str,
    ) -> Result<ServiceRequest> {
        let created_by_owned = created_by_param.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ServiceRequest> {
                let mut request_db = ServiceRequestDB::pending(new_request, &created_by_owned);
                if request_db.id.is_empty() {
                    request_db.id = Uuid::new_v4().to_string();
                }

                let result_db = diesel::insert_into(service_requests::table)
                    .values(&request_db)
                    .returning(ServiceRequestDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }

    async fn claim(&self, request_id: &str, instructor_id: &str) -> Result<ServiceRequest> {
        let request_id_owned = request_id.to_string();
        let instructor_owned = instructor_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ServiceRequest> {
                let affected = diesel::update(
                    service_requests
                        .filter(id.eq(&request_id_owned))
                        .filter(status.eq(RequestStatus::Pending.as_str())),
                )
                .set((
                    status.eq(RequestStatus::Assigned.as_str()),
                    assigned_to.eq(instructor_owned.clone()),
                    assigned_at.eq(now_micros()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    // The precondition missed. Re-read in the same transaction
                    // and report the exact rule that blocked the claim.
                    let current = load_row(conn, &request_id_owned)?;
                    return Err(match current.status() {
                        RequestStatus::Assigned => {
                            Error::Request(RequestError::AlreadyClaimed(request_id_owned.clone()))
                        }
                        from_status => Error::Request(RequestError::InvalidTransition {
                            from: from_status,
                            to: RequestStatus::Assigned,
                        }),
                    });
                }

                load_row(conn, &request_id_owned)
            })
            .await
    }

    async fn complete(&self, request_id: &str, instructor_id: &str) -> Result<ServiceRequest> {
        let request_id_owned = request_id.to_string();
        let instructor_owned = instructor_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ServiceRequest> {
                let affected = diesel::update(
                    service_requests
                        .filter(id.eq(&request_id_owned))
                        .filter(status.eq(RequestStatus::Assigned.as_str()))
                        .filter(assigned_to.eq(instructor_owned.as_str())),
                )
                .set((
                    status.eq(RequestStatus::Completed.as_str()),
                    completed_at.eq(now_micros()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    let current = load_row(conn, &request_id_owned)?;
                    return Err(match current.status() {
                        // Assigned, but the condition missed: someone else
                        // holds it.
                        RequestStatus::Assigned => Error::Request(RequestError::NotAssignee {
                            request_id: request_id_owned.clone(),
                            instructor_id: instructor_owned.clone(),
                        }),
                        from_status => Error::Request(RequestError::InvalidTransition {
                            from: from_status,
                            to: RequestStatus::Completed,
                        }),
                    });
                }

                load_row(conn, &request_id_owned)
            })
            .await
    }

    async fn cancel(
        &self,
        request_id: &str,
        reason: &str,
        canceller: &str,
    ) -> Result<ServiceRequest> {
        let request_id_owned = request_id.to_string();
        let reason_owned = reason.to_string();
        let canceller_owned = canceller.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ServiceRequest> {
                // Clearing the assignee keeps cancelled rows out of
                // per-instructor filters; the audit trail lives in
                // cancel_reason / cancelled_at / cancelled_by.
                let affected = diesel::update(
                    service_requests.filter(id.eq(&request_id_owned)).filter(
                        status.eq_any([
                            RequestStatus::Pending.as_str(),
                            RequestStatus::Assigned.as_str(),
                        ]),
                    ),
                )
                .set((
                    status.eq(RequestStatus::Cancelled.as_str()),
                    assigned_to.eq(None::<String>),
                    assigned_at.eq(None::<NaiveDateTime>),
                    cancel_reason.eq(reason_owned.clone()),
                    cancelled_at.eq(now_micros()),
                    cancelled_by.eq(canceller_owned.clone()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    let current = load_row(conn, &request_id_owned)?;
                    return Err(Error::Request(RequestError::InvalidTransition {
                        from: current.status(),
                        to: RequestStatus::Cancelled,
                    }));
                }

                load_row(conn, &request_id_owned)
            })
            .await
    }
}
