//! Repository-level behaviors against a real SQLite database: migrations,
//! lazy configuration seeding, the legacy uid fallback, keyset pagination,
//! and the append-only payment ledger.

mod common;

use std::collections::HashSet;

use common::{book, harness, python_offering, seed_staff, FOUNDER, INSTRUCTOR, STUDENT};

use academy_core::catalog::{
    CatalogServiceTrait, NewService, ServiceRepositoryTrait, ServiceUpdate,
};
use academy_core::config::{ConfigServiceTrait, FinancialConfigRepositoryTrait, FinancialConfigUpdate};
use academy_core::errors::{DatabaseError, Error};
use academy_core::payments::{
    InstructorPaymentRepositoryTrait, SettlementItem, SettlementServiceTrait,
};
use academy_core::requests::{RequestError, RequestFilter, RequestServiceTrait};
use academy_core::users::{
    NewUserProfile, Role, RoleResolver, RoleResolverTrait, UserProfileRepositoryTrait,
    UserServiceTrait,
};
use academy_storage_sqlite::{get_connection, run_migrations};
use diesel::prelude::*;
use rust_decimal_macros::dec;

#[tokio::test]
async fn migrations_are_idempotent() -> anyhow::Result<()> {
    let h = harness().await;
    // The harness already migrated once; a second run has nothing to apply.
    run_migrations(&h.pool)?;
    Ok(())
}

#[tokio::test]
async fn configuration_is_seeded_on_first_read() -> anyhow::Result<()> {
    let h = harness().await;

    let first = h.config.get_or_init().await?;
    assert_eq!(first.id, "financial");
    assert_eq!(first.teacher_base_rate, dec!(11500));
    assert_eq!(first.teacher_bonus_per_student, dec!(1000));
    assert_eq!(first.volume_discount_per_hour, dec!(500));
    assert_eq!(first.teacher_percentage, dec!(70));
    assert_eq!(first.platform_percentage, dec!(30));
    assert_eq!(first.updated_by, None);

    // The second read hits the stored record instead of re-seeding.
    let second = h.config.get_or_init().await?;
    assert_eq!(second, first);
    assert_eq!(h.config_repo.get()?, first);

    Ok(())
}

#[tokio::test]
async fn configuration_updates_round_trip_exact_decimals() -> anyhow::Result<()> {
    let h = harness().await;
    seed_staff(&h).await;

    let updated = h
        .config
        .update(
            FOUNDER,
            FinancialConfigUpdate {
                teacher_base_rate: dec!(11500.50),
                teacher_bonus_per_student: dec!(999.99),
                volume_discount_per_hour: dec!(500),
                teacher_percentage: dec!(72.5),
                platform_percentage: dec!(27.5),
            },
        )
        .await?;
    assert_eq!(updated.updated_by.as_deref(), Some(FOUNDER));

    // Rates come back from TEXT storage without drift.
    let stored = h.config_repo.get()?;
    assert_eq!(stored.teacher_base_rate, dec!(11500.50));
    assert_eq!(stored.teacher_bonus_per_student, dec!(999.99));
    assert_eq!(stored.teacher_percentage, dec!(72.5));
    assert_eq!(stored.platform_percentage, dec!(27.5));
    assert_eq!(stored, updated);

    Ok(())
}

#[tokio::test]
async fn role_resolution_falls_back_to_the_uid_column() -> anyhow::Result<()> {
    let h = harness().await;

    // Historical record: auto-generated key, provider id kept in uid.
    h.users
        .upsert(NewUserProfile {
            id: "legacy-row-1".to_string(),
            uid: Some("auth0|abc123".to_string()),
            email: None,
            display_name: "Lea Legacy".to_string(),
            role: Role::Instructor,
        })
        .await?;

    let resolver = RoleResolver::new(h.users.clone());
    assert_eq!(resolver.resolve_role("auth0|abc123"), Role::Instructor);
    assert_eq!(resolver.resolve_role("legacy-row-1"), Role::Instructor);
    assert_eq!(resolver.resolve_role("nobody"), Role::Student);

    Ok(())
}

#[tokio::test]
async fn profile_upserts_keep_created_at_and_roles_can_change() -> anyhow::Result<()> {
    let h = harness().await;
    seed_staff(&h).await;

    let original = h.users.get_by_id(STUDENT)?;

    let renamed = h
        .users
        .upsert(NewUserProfile {
            id: STUDENT.to_string(),
            uid: None,
            email: Some("sol@academy.test".to_string()),
            display_name: "Sol S. Student".to_string(),
            role: Role::Student,
        })
        .await?;
    assert_eq!(renamed.created_at, original.created_at);
    assert_eq!(renamed.display_name, "Sol S. Student");
    assert_eq!(renamed.email.as_deref(), Some("sol@academy.test"));

    let promoted = h.admin.set_role(FOUNDER, STUDENT, Role::Instructor).await?;
    assert_eq!(promoted.role, Role::Instructor);
    assert_eq!(h.users.get_by_id(STUDENT)?.role, Role::Instructor);

    Ok(())
}

#[tokio::test]
async fn catalog_crud_round_trip() -> anyhow::Result<()> {
    let h = harness().await;
    seed_staff(&h).await;

    let created = h
        .catalog
        .create_service(
            FOUNDER,
            NewService {
                id: None,
                name: "Rust Workshop".to_string(),
                students: 4,
                hours: 3,
                price_per_student: dec!(18000),
            },
        )
        .await?;
    assert!(!created.id.is_empty());

    let updated = h
        .catalog
        .update_service(
            FOUNDER,
            ServiceUpdate {
                id: Some(created.id.clone()),
                name: "Advanced Rust Workshop".to_string(),
                students: 4,
                hours: 4,
                price_per_student: dec!(21000),
            },
        )
        .await?;
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "Advanced Rust Workshop");
    assert_eq!(updated.hours, 4);
    assert_eq!(updated.price_per_student, dec!(21000));

    let offering = python_offering(&h).await;
    let listed = h.catalog.list_services()?;
    let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Advanced Rust Workshop", "Intro to Python"]);

    // Missing ids are skipped, not errors.
    let found = h
        .services_repo
        .list_by_ids(&[offering.id.clone(), "svc-ghost".to_string()])?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, offering.id);

    h.catalog.delete_service(FOUNDER, &created.id).await?;
    assert!(matches!(
        h.catalog.get_service(&created.id),
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
    assert!(h.catalog.delete_service(FOUNDER, &created.id).await.is_err());

    Ok(())
}

#[tokio::test]
async fn request_listings_page_newest_first_without_duplicates() -> anyhow::Result<()> {
    let h = harness().await;
    seed_staff(&h).await;
    let offering = python_offering(&h).await;

    let mut booked_ids = Vec::new();
    for n in 0..7 {
        let request = book(&h, &offering.id, &format!("Python {}", n), 1).await;
        booked_ids.push(request.id);
    }

    let filter = RequestFilter::default();
    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    loop {
        let page = h.requests.list_requests(&filter, cursor.as_deref(), Some(3))?;
        pages += 1;
        seen.extend(page.requests.iter().map(|r| r.id.clone()));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(pages, 3);
    assert_eq!(seen.len(), 7);
    let unique: HashSet<&String> = seen.iter().collect();
    assert_eq!(unique.len(), 7);

    // Newest first: the walk returns the bookings in reverse order.
    let newest_first: Vec<String> = booked_ids.iter().rev().cloned().collect();
    assert_eq!(seen, newest_first);

    Ok(())
}

#[tokio::test]
async fn corrupt_money_text_surfaces_as_a_database_error() -> anyhow::Result<()> {
    let h = harness().await;
    seed_staff(&h).await;
    let offering = python_offering(&h).await;

    let mut conn = get_connection(&h.pool)?;
    diesel::sql_query("UPDATE services SET price_per_student = 'garbage' WHERE id = 'svc-python'")
        .execute(&mut conn)?;

    let err = h.services_repo.get_by_id(&offering.id).unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::Internal(_))));

    Ok(())
}

#[tokio::test]
async fn ledger_rows_store_request_ids_as_json() -> anyhow::Result<()> {
    let h = harness().await;
    seed_staff(&h).await;
    let offering = python_offering(&h).await;
    let request = book(&h, &offering.id, "Python", 2).await;

    h.requests.claim_request(INSTRUCTOR, &request.id).await?;
    h.requests.complete_request(INSTRUCTOR, &request.id).await?;
    let payment = h
        .settlement
        .settle_instructor(FOUNDER, INSTRUCTOR, None)
        .await?;

    use academy_storage_sqlite::schema::instructor_payments::dsl;
    let mut conn = get_connection(&h.pool)?;
    let raw: String = dsl::instructor_payments
        .filter(dsl::id.eq(&payment.id))
        .select(dsl::request_ids)
        .first(&mut conn)?;
    let decoded: Vec<String> = serde_json::from_str(&raw)?;
    assert_eq!(decoded, payment.request_ids);
    assert_eq!(decoded, vec![request.id]);

    Ok(())
}

#[tokio::test]
async fn stale_settlement_items_drop_out_and_empty_batches_roll_back() -> anyhow::Result<()> {
    let h = harness().await;
    seed_staff(&h).await;
    let offering = python_offering(&h).await;

    let first = book(&h, &offering.id, "Python", 2).await;
    let second = book(&h, &offering.id, "Python", 2).await;
    for id in [&first.id, &second.id] {
        h.requests.claim_request(INSTRUCTOR, id).await?;
        h.requests.complete_request(INSTRUCTOR, id).await?;
    }

    let item = |request_id: &str| SettlementItem {
        request_id: request_id.to_string(),
        payout: dec!(27000),
    };

    h.payments_repo
        .settle(INSTRUCTOR, &[item(&first.id)], FOUNDER, None)
        .await?;

    // A stale batch member silently drops out; the rest settles.
    let partial = h
        .payments_repo
        .settle(INSTRUCTOR, &[item(&first.id), item(&second.id)], FOUNDER, None)
        .await?;
    assert_eq!(partial.request_ids, vec![second.id.clone()]);
    assert_eq!(partial.amount, dec!(27000));

    // An all-stale batch writes no ledger entry at all.
    let err = h
        .payments_repo
        .settle(INSTRUCTOR, &[item(&first.id)], FOUNDER, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Request(RequestError::NothingToSettle(_))
    ));
    assert_eq!(h.payments_repo.list_for_instructor(INSTRUCTOR)?.len(), 2);

    Ok(())
}
