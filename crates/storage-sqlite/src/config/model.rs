use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use academy_core::config::FinancialConfig;
use academy_core::errors::Error;

use crate::utils::parse_money;

/// Database model for the financial configuration singleton.
///
/// Rates are stored as TEXT so that decimal amounts survive the round trip
/// without binary floating point drift.
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
#[diesel(table_name = crate::schema::financial_config)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FinancialConfigDB {
    pub id: String,
    pub teacher_base_rate: String,
    pub teacher_bonus_per_student: String,
    pub volume_discount_per_hour: String,
    pub teacher_percentage: String,
    pub platform_percentage: String,
    pub updated_at: NaiveDateTime,
    pub updated_by: Option<String>,
}

impl TryFrom<FinancialConfigDB> for FinancialConfig {
    type Error = Error;

    fn try_from(db: FinancialConfigDB) -> Result<Self, Self::Error> {
        Ok(FinancialConfig {
            teacher_base_rate: parse_money(&db.teacher_base_rate, "teacher_base_rate")?,
            teacher_bonus_per_student: parse_money(
                &db.teacher_bonus_per_student,
                "teacher_bonus_per_student",
            )?,
            volume_discount_per_hour: parse_money(
                &db.volume_discount_per_hour,
                "volume_discount_per_hour",
            )?,
            teacher_percentage: parse_money(&db.teacher_percentage, "teacher_percentage")?,
            platform_percentage: parse_money(&db.platform_percentage, "platform_percentage")?,
            id: db.id,
            updated_at: db.updated_at,
            updated_by: db.updated_by,
        })
    }
}

impl From<FinancialConfig> for FinancialConfigDB {
    fn from(config: FinancialConfig) -> Self {
        FinancialConfigDB {
            id: config.id,
            teacher_base_rate: config.teacher_base_rate.to_string(),
            teacher_bonus_per_student: config.teacher_bonus_per_student.to_string(),
            volume_discount_per_hour: config.volume_discount_per_hour.to_string(),
            teacher_percentage: config.teacher_percentage.to_string(),
            platform_percentage: config.platform_percentage.to_string(),
            updated_at: config.updated_at,
            updated_by: config.updated_by,
        }
    }
}
