use async_trait::async_trait;
use log::{info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::payments_model::{InstructorBalance, InstructorPayment, SettlementItem};
use super::payments_traits::{InstructorPaymentRepositoryTrait, SettlementServiceTrait};
use crate::catalog::{Service, ServiceRepositoryTrait};
use crate::config::{ConfigServiceTrait, FinancialConfig};
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{Error, Result};
use crate::pricing::{self, EngagementTerms};
use crate::requests::{RequestError, ServiceRequest, ServiceRequestRepositoryTrait};
use crate::users::RoleResolverTrait;

/// Service for payout reporting and settlement.
///
/// Payouts are computed through the pricing calculator from the request's
/// actual hours and the referenced service's group size and price, against
/// the configuration read once per operation. The settlement write itself is
/// a single repository transaction; this service only prepares the batch.
pub struct SettlementService {
    payments: Arc<dyn InstructorPaymentRepositoryTrait>,
    requests: Arc<dyn ServiceRequestRepositoryTrait>,
    services: Arc<dyn ServiceRepositoryTrait>,
    config: Arc<dyn ConfigServiceTrait>,
    roles: Arc<dyn RoleResolverTrait>,
}

impl SettlementService {
    pub fn new(
        payments: Arc<dyn InstructorPaymentRepositoryTrait>,
        requests: Arc<dyn ServiceRequestRepositoryTrait>,
        services: Arc<dyn ServiceRepositoryTrait>,
        config: Arc<dyn ConfigServiceTrait>,
        roles: Arc<dyn RoleResolverTrait>,
    ) -> Self {
        SettlementService {
            payments,
            requests,
            services,
            config,
            roles,
        }
    }

    /// Resolves every service the given requests reference, keyed by id.
    /// Missing services are simply absent; callers decide how to react.
    fn service_index(&self, requests: &[ServiceRequest]) -> Result<HashMap<String, Service>> {
        let mut ids: Vec<String> = requests
            .iter()
            .map(|request| request.service_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(self
            .services
            .list_by_ids(&ids)?
            .into_iter()
            .map(|service| (service.id.clone(), service))
            .collect())
    }

    fn payout_for(
        request: &ServiceRequest,
        service: &Service,
        config: &FinancialConfig,
    ) -> Result<Decimal> {
        let breakdown = pricing::quote(
            &EngagementTerms {
                students: service.students,
                hours: request.hours,
                price_per_student: service.price_per_student,
            },
            config,
        )?;
        Ok(breakdown.teacher_payment)
    }

    fn balance_of(
        instructor_id: &str,
        requests: &[&ServiceRequest],
        services: &HashMap<String, Service>,
        config: &FinancialConfig,
    ) -> Result<InstructorBalance> {
        let mut balance = InstructorBalance::empty(instructor_id);
        for request in requests {
            match services.get(&request.service_id) {
                Some(service) => {
                    balance.total_owed += Self::payout_for(request, service, config)?;
                    balance.request_count += 1;
                }
                None => {
                    warn!(
                        "request '{}' references missing service '{}', excluded from the balance of '{}'",
                        request.id, request.service_id, instructor_id
                    );
                    balance.unpriced_requests += 1;
                }
            }
        }
        Ok(balance)
    }
}

#[async_trait]
impl SettlementServiceTrait for SettlementService {
    async fn outstanding_balances(&self, actor_id: &str) -> Result<Vec<InstructorBalance>> {
        self.roles.ensure_manager(actor_id)?;
        let config = self.config.get_or_init().await?;
        let outstanding = self.requests.list_all_unpaid_completed()?;
        let services = self.service_index(&outstanding)?;

        let mut by_instructor: HashMap<&str, Vec<&ServiceRequest>> = HashMap::new();
        for request in &outstanding {
            // Completed rows structurally carry their instructor.
            if let Some(instructor_id) = request.assigned_to() {
                by_instructor.entry(instructor_id).or_default().push(request);
            }
        }

        let mut balances = Vec::with_capacity(by_instructor.len());
        for (instructor_id, requests) in by_instructor {
            balances.push(Self::balance_of(
                instructor_id,
                &requests,
                &services,
                &config,
            )?);
        }
        balances.sort_by(|a, b| a.instructor_id.cmp(&b.instructor_id));
        Ok(balances)
    }

    async fn outstanding_for(
        &self,
        actor_id: &str,
        instructor_id: &str,
    ) -> Result<InstructorBalance> {
        if actor_id != instructor_id {
            self.roles.ensure_manager(actor_id)?;
        }
        let config = self.config.get_or_init().await?;
        let outstanding = self.requests.list_unpaid_completed(instructor_id)?;
        let services = self.service_index(&outstanding)?;
        let refs: Vec<&ServiceRequest> = outstanding.iter().collect();
        Self::balance_of(instructor_id, &refs, &services, &config)
    }

    async fn settle_instructor(
        &self,
        actor_id: &str,
        instructor_id: &str,
        notes: Option<&str>,
    ) -> Result<InstructorPayment> {
        self.roles.ensure_manager(actor_id)?;
        let config = self.config.get_or_init().await?;

        let outstanding = self.requests.list_unpaid_completed(instructor_id)?;
        if outstanding.is_empty() {
            return Err(Error::Request(RequestError::NothingToSettle(
                instructor_id.to_string(),
            )));
        }

        // Price the whole batch before touching anything; a dangling service
        // reference aborts the settlement rather than shrinking the payout
        // behind the founder's back.
        let services = self.service_index(&outstanding)?;
        let mut items = Vec::with_capacity(outstanding.len());
        for request in &outstanding {
            let service = services.get(&request.service_id).ok_or_else(|| {
                Error::Request(RequestError::ServiceMissing {
                    request_id: request.id.clone(),
                    service_id: request.service_id.clone(),
                })
            })?;
            items.push(SettlementItem {
                request_id: request.id.clone(),
                payout: Self::payout_for(request, service, &config)?,
            });
        }

        let payment = self
            .payments
            .settle(instructor_id, &items, actor_id, notes)
            .await?;
        info!(
            "settled {} request(s) for '{}' totalling {} (payment '{}')",
            payment.request_ids.len(),
            instructor_id,
            payment.amount,
            payment.id
        );
        Ok(payment)
    }

    fn list_payments(&self, actor_id: &str, instructor_id: &str) -> Result<Vec<InstructorPayment>> {
        if actor_id != instructor_id {
            self.roles.ensure_manager(actor_id)?;
        }
        self.payments.list_for_instructor(instructor_id)
    }

    fn recent_payments(
        &self,
        actor_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<InstructorPayment>> {
        self.roles.ensure_manager(actor_id)?;
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        self.payments.list_recent(limit)
    }
}
