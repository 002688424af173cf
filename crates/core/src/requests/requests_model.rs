//! Service request domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{errors::ValidationError, Error, Result};

/// Timestamp format used inside list cursors.
const CURSOR_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Payload-free lifecycle discriminant, used in filters and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Assigned,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Assigned => "assigned",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// The legal transition table. Everything not listed here is an
    /// [`super::RequestError::InvalidTransition`].
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Assigned)
                | (RequestStatus::Pending, RequestStatus::Cancelled)
                | (RequestStatus::Assigned, RequestStatus::Completed)
                | (RequestStatus::Assigned, RequestStatus::Cancelled)
        )
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "assigned" => Ok(RequestStatus::Assigned),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" => Ok(RequestStatus::Cancelled),
            _ => Err(format!("Unknown request status: {}", s)),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a service request, with the data each state owns.
///
/// Modelling the state as a union makes "an assigned request always has an
/// instructor and an assignment time" structurally true instead of a
/// convention over nullable columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum RequestState {
    Pending,
    Assigned {
        instructor_id: String,
        assigned_at: NaiveDateTime,
    },
    Completed {
        instructor_id: String,
        assigned_at: NaiveDateTime,
        completed_at: NaiveDateTime,
    },
    Cancelled {
        reason: String,
        cancelled_at: NaiveDateTime,
        cancelled_by: String,
    },
}

impl RequestState {
    pub fn status(&self) -> RequestStatus {
        match self {
            RequestState::Pending => RequestStatus::Pending,
            RequestState::Assigned { .. } => RequestStatus::Assigned,
            RequestState::Completed { .. } => RequestStatus::Completed,
            RequestState::Cancelled { .. } => RequestStatus::Cancelled,
        }
    }

    /// The instructor holding the request, while one does.
    pub fn instructor_id(&self) -> Option<&str> {
        match self {
            RequestState::Assigned { instructor_id, .. }
            | RequestState::Completed { instructor_id, .. } => Some(instructor_id),
            RequestState::Pending | RequestState::Cancelled { .. } => None,
        }
    }
}

/// Domain model for a booked service request.
///
/// `hours` is the actual booked duration and governs the payout; the
/// referenced service contributes group size and per-student price. The
/// reference is weak: deleting the service leaves the request behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub service_id: String,
    pub subject: String,
    pub student_name: String,
    pub hours: i32,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub state: RequestState,
    pub is_paid: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

impl ServiceRequest {
    pub fn status(&self) -> RequestStatus {
        self.state.status()
    }

    pub fn assigned_to(&self) -> Option<&str> {
        self.state.instructor_id()
    }
}

/// Input model for booking a new service request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub service_id: String,
    pub subject: String,
    pub student_name: String,
    pub hours: i32,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewServiceRequest {
    /// Validates the request data before any write.
    pub fn validate(&self) -> Result<()> {
        if self.service_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "serviceId".to_string(),
            )));
        }
        if self.subject.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "subject".to_string(),
            )));
        }
        if self.student_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "studentName".to_string(),
            )));
        }
        if self.hours < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Booked hours must be at least 1, got {}",
                self.hours
            ))));
        }
        Ok(())
    }
}

/// Filter for request listings. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub assigned_to: Option<String>,
    pub is_paid: Option<bool>,
}

/// One page of a newest-first request listing.
///
/// `next_cursor` is present when another page may exist; feed it back into
/// the listing call to continue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPage {
    pub requests: Vec<ServiceRequest>,
    pub next_cursor: Option<String>,
}

/// Encodes a keyset cursor pointing just past the given row.
///
/// Listings order by `(created_at, id)` descending, so the pair identifies a
/// position even when several rows share a timestamp.
pub fn encode_cursor(created_at: NaiveDateTime, id: &str) -> String {
    format!("{}|{}", created_at.format(CURSOR_TIMESTAMP_FORMAT), id)
}

/// Decodes a cursor produced by [`encode_cursor`].
pub fn decode_cursor(cursor: &str) -> Result<(NaiveDateTime, String)> {
    let malformed = || {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Malformed listing cursor: {}",
            cursor
        )))
    };
    let (timestamp, id) = cursor.split_once('|').ok_or_else(malformed)?;
    if id.is_empty() {
        return Err(malformed());
    }
    let created_at = NaiveDateTime::parse_from_str(timestamp, CURSOR_TIMESTAMP_FORMAT)?;
    Ok((created_at, id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_request(state: RequestState) -> ServiceRequest {
        ServiceRequest {
            id: "req-1".to_string(),
            service_id: "svc-1".to_string(),
            subject: "Python".to_string(),
            student_name: "Noa".to_string(),
            hours: 2,
            scheduled_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            notes: None,
            state,
            is_paid: false,
            created_by: "founder-1".to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 5, 20)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn transition_table_is_exact() {
        use RequestStatus::*;
        let legal = [
            (Pending, Assigned),
            (Pending, Cancelled),
            (Assigned, Completed),
            (Assigned, Cancelled),
        ];
        for from in [Pending, Assigned, Completed, Cancelled] {
            for to in [Pending, Assigned, Completed, Cancelled] {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn state_flattens_into_the_request_object() {
        let assigned = sample_request(RequestState::Assigned {
            instructor_id: "instructor-1".to_string(),
            assigned_at: NaiveDate::from_ymd_opt(2025, 5, 21)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        });
        let value = serde_json::to_value(&assigned).unwrap();
        assert_eq!(value["status"], "assigned");
        assert_eq!(value["instructorId"], "instructor-1");
        assert!(value.get("assignedAt").is_some());

        let pending = sample_request(RequestState::Pending);
        let value = serde_json::to_value(&pending).unwrap();
        assert_eq!(value["status"], "pending");
        assert!(value.get("instructorId").is_none());
    }

    #[test]
    fn request_round_trips_through_json() {
        let original = sample_request(RequestState::Cancelled {
            reason: "student no-show".to_string(),
            cancelled_at: NaiveDate::from_ymd_opt(2025, 5, 22)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            cancelled_by: "founder-1".to_string(),
        });
        let json = serde_json::to_string(&original).unwrap();
        let parsed: ServiceRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn cursor_round_trips() {
        let created_at = NaiveDate::from_ymd_opt(2025, 5, 20)
            .unwrap()
            .and_hms_micro_opt(9, 30, 0, 123456)
            .unwrap();
        let cursor = encode_cursor(created_at, "req-42");
        let (decoded_at, decoded_id) = decode_cursor(&cursor).unwrap();
        assert_eq!(decoded_at, created_at);
        assert_eq!(decoded_id, "req-42");
    }

    #[test]
    fn malformed_cursors_are_rejected() {
        assert!(decode_cursor("no-separator").is_err());
        assert!(decode_cursor("2025-05-20T09:30:00.000000|").is_err());
        assert!(decode_cursor("yesterday|req-1").is_err());
    }

    #[test]
    fn booking_validation() {
        let booking = NewServiceRequest {
            id: None,
            service_id: "svc-1".to_string(),
            subject: "Python".to_string(),
            student_name: "Noa".to_string(),
            hours: 2,
            scheduled_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            notes: None,
        };
        assert!(booking.validate().is_ok());

        let mut bad = booking.clone();
        bad.hours = 0;
        assert!(bad.validate().is_err());

        let mut bad = booking;
        bad.student_name = " ".to_string();
        assert!(bad.validate().is_err());
    }
}
