//! Request lifecycle error types.

use thiserror::Error;

use super::requests_model::RequestStatus;

/// Errors that can occur while moving a service request through its
/// lifecycle or settling it.
///
/// These are precision errors: a failed optimistic precondition in the store
/// is re-read and reported as the specific rule that was violated, never as
/// a generic conflict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Request cannot move from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Request {0} was already claimed by another instructor")]
    AlreadyClaimed(String),

    #[error("Request {request_id} is not assigned to '{instructor_id}'")]
    NotAssignee {
        request_id: String,
        instructor_id: String,
    },

    #[error("Request {0} was already paid out")]
    AlreadyPaid(String),

    #[error("Nothing to settle for instructor '{0}'")]
    NothingToSettle(String),

    #[error("Request {request_id} references missing service {service_id}")]
    ServiceMissing {
        request_id: String,
        service_id: String,
    },
}
