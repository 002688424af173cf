use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use academy_core::catalog::{NewService, Service};
use academy_core::errors::Error;

use crate::utils::{now_micros, parse_money};

/// Database model for service offerings.
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
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ServiceDB {
    pub id: String,
    pub name: String,
    pub students: i32,
    pub hours: i32,
    pub price_per_student: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ServiceDB> for Service {
    type Error = Error;

    fn try_from(db: ServiceDB) -> Result<Self, Self::Error> {
        Ok(Service {
            price_per_student: parse_money(&db.price_per_student, "price_per_student")?,
            id: db.id,
            name: db.name,
            students: db.students,
            hours: db.hours,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewService> for ServiceDB {
    fn from(service: NewService) -> Self {
        let now = now_micros();
        ServiceDB {
            id: service.id.unwrap_or_default(),
            name: service.name,
            students: service.students,
            hours: service.hours,
            price_per_student: service.price_per_student.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
