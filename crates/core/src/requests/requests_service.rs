use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::requests_model::{
    NewServiceRequest, RequestFilter, RequestPage, RequestStatus, ServiceRequest,
};
use super::requests_traits::{RequestServiceTrait, ServiceRequestRepositoryTrait};
use crate::catalog::ServiceRepositoryTrait;
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::users::RoleResolverTrait;

/// Service for the request lifecycle.
///
/// Authorization is checked here; state preconditions are enforced by the
/// repository's conditional updates, so a race between two callers is
/// decided by the store and surfaced as a typed lifecycle error.
pub struct RequestService {
    repository: Arc<dyn ServiceRequestRepositoryTrait>,
    services: Arc<dyn ServiceRepositoryTrait>,
    roles: Arc<dyn RoleResolverTrait>,
}

impl RequestService {
    pub fn new(
        repository: Arc<dyn ServiceRequestRepositoryTrait>,
        services: Arc<dyn ServiceRepositoryTrait>,
        roles: Arc<dyn RoleResolverTrait>,
    ) -> Self {
        RequestService {
            repository,
            services,
            roles,
        }
    }

    fn clamp_limit(limit: Option<i64>) -> i64 {
        limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

#[async_trait]
impl RequestServiceTrait for RequestService {
    fn get_request(&self, request_id: &str) -> Result<ServiceRequest> {
        self.repository.get_by_id(request_id)
    }

    fn list_requests(
        &self,
        filter: &RequestFilter,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<RequestPage> {
        self.repository
            .list(filter, cursor, Self::clamp_limit(limit))
    }

    fn open_requests(&self, cursor: Option<&str>, limit: Option<i64>) -> Result<RequestPage> {
        let filter = RequestFilter {
            status: Some(RequestStatus::Pending),
            ..Default::default()
        };
        self.repository
            .list(&filter, cursor, Self::clamp_limit(limit))
    }

    async fn create_request(
        &self,
        actor_id: &str,
        new_request: NewServiceRequest,
    ) -> Result<ServiceRequest> {
        self.roles.ensure_manager(actor_id)?;
        new_request.validate()?;

        // The reference is weak in the store, so the existence check has to
        // happen up front; a typo'd service id must not produce a request
        // that can never be priced.
        match self.services.get_by_id(&new_request.service_id) {
            Ok(_) => {}
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown service: {}",
                    new_request.service_id
                ))));
            }
            Err(e) => return Err(e),
        }

        let created = self.repository.insert(new_request, actor_id).await?;
        info!("request '{}' created by '{}'", created.id, actor_id);
        Ok(created)
    }

    async fn claim_request(&self, actor_id: &str, request_id: &str) -> Result<ServiceRequest> {
        self.roles.ensure_claimant(actor_id)?;
        let claimed = self.repository.claim(request_id, actor_id).await?;
        info!("request '{}' claimed by '{}'", request_id, actor_id);
        Ok(claimed)
    }

    async fn complete_request(&self, actor_id: &str, request_id: &str) -> Result<ServiceRequest> {
        self.roles.ensure_claimant(actor_id)?;
        let completed = self.repository.complete(request_id, actor_id).await?;
        info!("request '{}' completed by '{}'", request_id, actor_id);
        Ok(completed)
    }

    async fn cancel_request(
        &self,
        actor_id: &str,
        request_id: &str,
        reason: &str,
    ) -> Result<ServiceRequest> {
        self.roles.ensure_manager(actor_id)?;
        if reason.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cancellation reason cannot be empty".to_string(),
            )));
        }
        let cancelled = self.repository.cancel(request_id, reason, actor_id).await?;
        info!(
            "request '{}' cancelled by '{}' ({})",
            request_id, actor_id, reason
        );
        Ok(cancelled)
    }
}
