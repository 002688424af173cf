use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::ServiceDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::services;
use crate::schema::services::dsl::*;
use crate::utils::{chunk_for_sqlite, now_micros};
use academy_core::catalog::{NewService, Service, ServiceRepositoryTrait, ServiceUpdate};
use academy_core::errors::{DatabaseError, Error, Result};

pub struct ServiceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ServiceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ServiceRepository { pool, writer }
    }
}

#[async_trait]
impl ServiceRepositoryTrait for ServiceRepository {
    fn get_by_id(&self, service_id: &str) -> Result<Service> {
        let mut conn = get_connection(&self.pool)?;
        let service_db = services
            .find(service_id)
            .first::<ServiceDB>(&mut conn)
            .map_err(StorageError::from)?;
        service_db.try_into()
    }

    fn list(&self) -> Result<Vec<Service>> {
        let mut conn = get_connection(&self.pool)?;
        let services_db = services
            .order(name.asc())
            .load::<ServiceDB>(&mut conn)
            .map_err(StorageError::from)?;
        services_db.into_iter().map(Service::try_from).collect()
    }

    fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Service>> {
        let mut conn = get_connection(&self.pool)?;
        let mut result = Vec::with_capacity(ids.len());
        for chunk in chunk_for_sqlite(ids) {
            let services_db = services
                .filter(id.eq_any(chunk))
                .load::<ServiceDB>(&mut conn)
                .map_err(StorageError::from)?;
            for service_db in services_db {
                result.push(service_db.try_into()?);
            }
        }
        Ok(result)
    }

    async fn create(&self, new_service: NewService) -> Result<Service> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Service> {
                let mut service_db: ServiceDB = new_service.into();
                if service_db.id.is_empty() {
                    service_db.id = Uuid::new_v4().to_string();
                }

                let result_db = diesel::insert_into(services::table)
                    .values(&service_db)
                    .returning(ServiceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }

    async fn update(&self, update: ServiceUpdate) -> Result<Service> {
        let service_id_owned = update.id.clone().unwrap_or_default();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Service> {
                // created_at stays untouched; only the advertised terms move.
                let result_db = diesel::update(services.find(&service_id_owned))
                    .set((
                        name.eq(update.name.clone()),
                        students.eq(update.students),
                        hours.eq(update.hours),
                        price_per_student.eq(update.price_per_student.to_string()),
                        updated_at.eq(now_micros()),
                    ))
                    .get_result::<ServiceDB>(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }

    async fn delete(&self, service_id: &str) -> Result<()> {
        let service_id_owned = service_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(services.find(&service_id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Service {} not found",
                        service_id_owned
                    ))));
                }
                Ok(())
            })
            .await
    }
}
