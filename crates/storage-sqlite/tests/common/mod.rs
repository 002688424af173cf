// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use academy_core::catalog::{CatalogService, CatalogServiceTrait, NewService, Service};
use academy_core::config::ConfigService;
use academy_core::payments::SettlementService;
use academy_core::requests::{
    NewServiceRequest, RequestService, RequestServiceTrait, ServiceRequest,
};
use academy_core::users::{
    NewUserProfile, Role, RoleResolver, UserProfileRepositoryTrait, UserService,
};
use academy_storage_sqlite::catalog::ServiceRepository;
use academy_storage_sqlite::config::FinancialConfigRepository;
use academy_storage_sqlite::db::{create_pool, run_migrations, spawn_writer};
use academy_storage_sqlite::payments::InstructorPaymentRepository;
use academy_storage_sqlite::requests::ServiceRequestRepository;
use academy_storage_sqlite::users::UserProfileRepository;
use academy_storage_sqlite::DbPool;

pub const FOUNDER: &str = "founder-1";
pub const INSTRUCTOR: &str = "instructor-1";
pub const SECOND_INSTRUCTOR: &str = "instructor-2";
pub const STUDENT: &str = "student-1";

/// Repositories and services wired the way the application wires them:
/// one pool for reads, one writer actor for writes, a single role resolver
/// injected everywhere.
///
/// The temp dir is the last field so the database file outlives the pool.
pub struct Harness {
    pub users: Arc<UserProfileRepository>,
    pub services_repo: Arc<ServiceRepository>,
    pub requests_repo: Arc<ServiceRequestRepository>,
    pub payments_repo: Arc<InstructorPaymentRepository>,
    pub config_repo: Arc<FinancialConfigRepository>,
    pub config: Arc<ConfigService>,
    pub catalog: Arc<CatalogService>,
    pub requests: Arc<RequestService>,
    pub settlement: Arc<SettlementService>,
    pub admin: Arc<UserService>,
    pub pool: Arc<DbPool>,
    _data_dir: TempDir,
}

pub async fn harness() -> Harness {
    let data_dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = data_dir.path().join("academy.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let pool = create_pool(&db_path_str).expect("failed to create pool");
    run_migrations(&pool).expect("failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    let users = Arc::new(UserProfileRepository::new(pool.clone(), writer.clone()));
    let services_repo = Arc::new(ServiceRepository::new(pool.clone(), writer.clone()));
    let requests_repo = Arc::new(ServiceRequestRepository::new(pool.clone(), writer.clone()));
    let payments_repo = Arc::new(InstructorPaymentRepository::new(pool.clone(), writer.clone()));
    let config_repo = Arc::new(FinancialConfigRepository::new(pool.clone(), writer));

    let roles = Arc::new(RoleResolver::new(users.clone()));
    let config = Arc::new(ConfigService::new(config_repo.clone(), roles.clone()));
    let catalog = Arc::new(CatalogService::new(services_repo.clone(), roles.clone()));
    let requests = Arc::new(RequestService::new(
        requests_repo.clone(),
        services_repo.clone(),
        roles.clone(),
    ));
    let settlement = Arc::new(SettlementService::new(
        payments_repo.clone(),
        requests_repo.clone(),
        services_repo.clone(),
        config.clone(),
        roles.clone(),
    ));
    let admin = Arc::new(UserService::new(users.clone(), roles));

    Harness {
        users,
        services_repo,
        requests_repo,
        payments_repo,
        config_repo,
        config,
        catalog,
        requests,
        settlement,
        admin,
        pool,
        _data_dir: data_dir,
    }
}

/// Seeds one profile per role, ids matching the module constants.
pub async fn seed_staff(h: &Harness) {
    for (user_id, display_name, role) in [
        (FOUNDER, "Dana Founder", Role::Founder),
        (INSTRUCTOR, "Ira Instructor", Role::Instructor),
        (SECOND_INSTRUCTOR, "Noa Instructor", Role::Instructor),
        (STUDENT, "Sol Student", Role::Student),
    ] {
        h.users
            .upsert(NewUserProfile {
                id: user_id.to_string(),
                uid: None,
                email: Some(format!("{}@academy.test", user_id)),
                display_name: display_name.to_string(),
                role,
            })
            .await
            .expect("failed to seed profile");
    }
}

/// The offering from the rate-card worked example: three students, two
/// hours, 20000 per student.
pub async fn python_offering(h: &Harness) -> Service {
    h.catalog
        .create_service(
            FOUNDER,
            NewService {
                id: Some("svc-python".to_string()),
                name: "Intro to Python".to_string(),
                students: 3,
                hours: 2,
                price_per_student: dec!(20000),
            },
        )
        .await
        .expect("failed to seed offering")
}

/// Books a pending request against `service_id` as the founder.
pub async fn book(h: &Harness, service_id: &str, subject: &str, hours: i32) -> ServiceRequest {
    h.requests
        .create_request(
            FOUNDER,
            NewServiceRequest {
                id: None,
                service_id: service_id.to_string(),
                subject: subject.to_string(),
                student_name: "Noa Levi".to_string(),
                hours,
                scheduled_date: NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date"),
                notes: None,
            },
        )
        .await
        .expect("failed to book request")
}
