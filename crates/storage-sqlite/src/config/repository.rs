use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::FinancialConfigDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::financial_config::dsl::*;
use academy_core::config::{FinancialConfig, FinancialConfigRepositoryTrait};
use academy_core::constants::FINANCIAL_CONFIG_ID;
use academy_core::errors::Result;

pub struct FinancialConfigRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FinancialConfigRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FinancialConfigRepository { pool, writer }
    }
}

#[async_trait]
impl FinancialConfigRepositoryTrait for FinancialConfigRepository {
    fn get(&self) -> Result<FinancialConfig> {
        let mut conn = get_connection(&self.pool)?;
        // A missing row surfaces as NotFound; the service layer seeds the
        // initial record when it sees that.
        let config_db = financial_config
            .find(FINANCIAL_CONFIG_ID)
            .first::<FinancialConfigDB>(&mut conn)
            .map_err(StorageError::from)?;
        config_db.try_into()
    }

    async fn upsert(&self, config: FinancialConfig) -> Result<FinancialConfig> {
        let config_db: FinancialConfigDB = config.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FinancialConfig> {
                diesel::replace_into(financial_config)
                    .values(&config_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result_db = financial_config
                    .find(&config_db.id)
                    .first::<FinancialConfigDB>(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }
}
