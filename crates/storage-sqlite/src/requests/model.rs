use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use academy_core::errors::{DatabaseError, Error};
use academy_core::requests::{NewServiceRequest, RequestState, RequestStatus, ServiceRequest};

use crate::utils::now_micros;

/// Database model for service requests.
///
/// The lifecycle union flattens into a `status` discriminant plus nullable
/// state columns. Reassembling the union on read checks that the columns the
/// status implies are actually present.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::service_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestDB {
    pub id: String,
    pub service_id: String,
    pub subject: String,
    pub student_name: String,
    pub hours: i32,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub assigned_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub cancel_reason: Option<String>,
    pub cancelled_at: Option<NaiveDateTime>,
    pub cancelled_by: Option<String>,
    pub is_paid: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

fn corrupt(request_id: &str, detail: &str) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "request '{}' is corrupt: {}",
        request_id, detail
    )))
}

impl ServiceRequestDB {
    /// A fresh pending row for a booking, stamped now.
    pub fn pending(new_request: NewServiceRequest, created_by: &str) -> Self {
        ServiceRequestDB {
            id: new_request.id.unwrap_or_default(),
            service_id: new_request.service_id,
            subject: new_request.subject,
            student_name: new_request.student_name,
            hours: new_request.hours,
            scheduled_date: new_request.scheduled_date,
            notes: new_request.notes,
            status: RequestStatus::Pending.as_str().to_string(),
            assigned_to: None,
            assigned_at: None,
            completed_at: None,
            cancel_reason: None,
            cancelled_at: None,
            cancelled_by: None,
            is_paid: false,
            created_by: created_by.to_string(),
            created_at: now_micros(),
        }
    }

    fn state(&self) -> Result<RequestState, Error> {
        let status_parsed = self
            .status
            .parse::<RequestStatus>()
            .map_err(|e| corrupt(&self.id, &e))?;

        match status_parsed {
            RequestStatus::Pending => Ok(RequestState::Pending),
            RequestStatus::Assigned => Ok(RequestState::Assigned {
                instructor_id: self
                    .assigned_to
                    .clone()
                    .ok_or_else(|| corrupt(&self.id, "assigned without assignee"))?,
                assigned_at: self
                    .assigned_at
                    .ok_or_else(|| corrupt(&self.id, "assigned without assignment time"))?,
            }),
            RequestStatus::Completed => Ok(RequestState::Completed {
                instructor_id: self
                    .assigned_to
                    .clone()
                    .ok_or_else(|| corrupt(&self.id, "completed without assignee"))?,
                assigned_at: self
                    .assigned_at
                    .ok_or_else(|| corrupt(&self.id, "completed without assignment time"))?,
                completed_at: self
                    .completed_at
                    .ok_or_else(|| corrupt(&self.id, "completed without completion time"))?,
            }),
            RequestStatus::Cancelled => Ok(RequestState::Cancelled {
                reason: self
                    .cancel_reason
                    .clone()
                    .ok_or_else(|| corrupt(&self.id, "cancelled without reason"))?,
                cancelled_at: self
                    .cancelled_at
                    .ok_or_else(|| corrupt(&self.id, "cancelled without cancellation time"))?,
                cancelled_by: self
                    .cancelled_by
                    .clone()
                    .ok_or_else(|| corrupt(&self.id, "cancelled without canceller"))?,
            }),
        }
    }
}

impl TryFrom<ServiceRequestDB> for ServiceRequest {
    type Error = Error;

    fn try_from(db: ServiceRequestDB) -> Result<Self, Self::Error> {
        let state = db.state()?;
        Ok(ServiceRequest {
            id: db.id,
            service_id: db.service_id,
            subject: db.subject,
            student_name: db.student_name,
            hours: db.hours,
            scheduled_date: db.scheduled_date,
            notes: db.notes,
            state,
            is_paid: db.is_paid,
            created_by: db.created_by,
            created_at: db.created_at,
        })
    }
}
