//! Service request repository and service traits.

use async_trait::async_trait;

use super::requests_model::{NewServiceRequest, RequestFilter, RequestPage, ServiceRequest};
use crate::errors::Result;

/// Trait defining the contract for request persistence.
///
/// Every transition method is an optimistic precondition in the store: a
/// conditional single-row update whose WHERE clause restates the expected
/// current state. When the condition misses, the implementation re-reads the
/// row and reports the precise lifecycle error instead of overwriting
/// whatever won the race.
#[async_trait]
pub trait ServiceRequestRepositoryTrait: Send + Sync {
    /// Retrieves a request by id.
    fn get_by_id(&self, request_id: &str) -> Result<ServiceRequest>;

    /// Lists requests newest-first, filtered, from an optional keyset
    /// cursor, at most `limit` rows.
    fn list(
        &self,
        filter: &RequestFilter,
        cursor: Option<&str>,
        limit: i64,
    ) -> Result<RequestPage>;

    /// Completed, unpaid requests assigned to one instructor. Settlement
    /// input, unpaged.
    fn list_unpaid_completed(&self, instructor_id: &str) -> Result<Vec<ServiceRequest>>;

    /// Completed, unpaid requests across all instructors. Balance report
    /// input, unpaged.
    fn list_all_unpaid_completed(&self) -> Result<Vec<ServiceRequest>>;

    /// Inserts a new request in the pending state.
    async fn insert(
        &self,
        new_request: NewServiceRequest,
        created_by: &str,
    ) -> Result<ServiceRequest>;

    /// Pending -> Assigned, conditional on the row still being pending.
    /// The losing side of a claim race gets `RequestError::AlreadyClaimed`.
    async fn claim(&self, request_id: &str, instructor_id: &str) -> Result<ServiceRequest>;

    /// Assigned -> Completed, conditional on the row being assigned to
    /// `instructor_id`.
    async fn complete(&self, request_id: &str, instructor_id: &str) -> Result<ServiceRequest>;

    /// Pending/Assigned -> Cancelled, recording who cancelled and why.
    async fn cancel(
        &self,
        request_id: &str,
        reason: &str,
        cancelled_by: &str,
    ) -> Result<ServiceRequest>;
}

/// Trait defining the contract for request lifecycle management.
#[async_trait]
pub trait RequestServiceTrait: Send + Sync {
    /// Retrieves a request by id.
    fn get_request(&self, request_id: &str) -> Result<ServiceRequest>;

    /// Lists requests newest-first. `limit` defaults to
    /// [`crate::constants::DEFAULT_PAGE_SIZE`] and is clamped to
    /// [`crate::constants::MAX_PAGE_SIZE`].
    fn list_requests(
        &self,
        filter: &RequestFilter,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<RequestPage>;

    /// The claimable pool: pending requests, newest-first.
    fn open_requests(&self, cursor: Option<&str>, limit: Option<i64>) -> Result<RequestPage>;

    /// Books a new request against an existing service. Founder-gated.
    async fn create_request(
        &self,
        actor_id: &str,
        new_request: NewServiceRequest,
    ) -> Result<ServiceRequest>;

    /// Claims a pending request for the acting instructor.
    async fn claim_request(&self, actor_id: &str, request_id: &str) -> Result<ServiceRequest>;

    /// Marks a request the actor holds as completed.
    async fn complete_request(&self, actor_id: &str, request_id: &str) -> Result<ServiceRequest>;

    /// Cancels a pending or assigned request with a reason. Founder-gated.
    async fn cancel_request(
        &self,
        actor_id: &str,
        request_id: &str,
        reason: &str,
    ) -> Result<ServiceRequest>;
}
