//! Financial configuration domain model.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::FINANCIAL_CONFIG_ID;
use crate::errors::{Error, Result, ValidationError};

/// The singleton financial configuration record.
///
/// Every rate is a currency amount per unit (base rate and bonus per hour,
/// discount per additional hour). `teacher_percentage` and
/// `platform_percentage` describe the revenue split and always sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialConfig {
    pub id: String,
    pub teacher_base_rate: Decimal,
    pub teacher_bonus_per_student: Decimal,
    pub volume_discount_per_hour: Decimal,
    pub teacher_percentage: Decimal,
    pub platform_percentage: Decimal,
    pub updated_at: NaiveDateTime,
    pub updated_by: Option<String>,
}

impl FinancialConfig {
    /// The record written on first read when no configuration exists yet.
    pub fn initial() -> Self {
        FinancialConfig {
            id: FINANCIAL_CONFIG_ID.to_string(),
            teacher_base_rate: dec!(11500),
            teacher_bonus_per_student: dec!(1000),
            volume_discount_per_hour: dec!(500),
            teacher_percentage: dec!(70),
            platform_percentage: dec!(30),
            updated_at: Utc::now().naive_utc(),
            updated_by: None,
        }
    }
}

/// Full-value update for the configuration singleton. Partial updates are
/// not supported; the percentage-sum invariant is only checkable over the
/// whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialConfigUpdate {
    pub teacher_base_rate: Decimal,
    pub teacher_bonus_per_student: Decimal,
    pub volume_discount_per_hour: Decimal,
    pub teacher_percentage: Decimal,
    pub platform_percentage: Decimal,
}

impl FinancialConfigUpdate {
    /// Validates the update before any write.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("teacherBaseRate", self.teacher_base_rate),
            ("teacherBonusPerStudent", self.teacher_bonus_per_student),
            ("volumeDiscountPerHour", self.volume_discount_per_hour),
            ("teacherPercentage", self.teacher_percentage),
            ("platformPercentage", self.platform_percentage),
        ] {
            if value < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "{} must not be negative, got {}",
                    field, value
                ))));
            }
        }
        if self.teacher_percentage + self.platform_percentage != dec!(100) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "teacherPercentage and platformPercentage must sum to 100, got {} + {}",
                self.teacher_percentage, self.platform_percentage
            ))));
        }
        Ok(())
    }

    /// Applies the update to an existing record, stamping the audit fields.
    pub fn apply_to(&self, current: &FinancialConfig, updated_by: &str) -> FinancialConfig {
        FinancialConfig {
            id: current.id.clone(),
            teacher_base_rate: self.teacher_base_rate,
            teacher_bonus_per_student: self.teacher_bonus_per_student,
            volume_discount_per_hour: self.volume_discount_per_hour,
            teacher_percentage: self.teacher_percentage,
            platform_percentage: self.platform_percentage,
            updated_at: Utc::now().naive_utc(),
            updated_by: Some(updated_by.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_update() -> FinancialConfigUpdate {
        FinancialConfigUpdate {
            teacher_base_rate: dec!(12000),
            teacher_bonus_per_student: dec!(1500),
            volume_discount_per_hour: dec!(250),
            teacher_percentage: dec!(65),
            platform_percentage: dec!(35),
        }
    }

    #[test]
    fn initial_config_is_valid_and_splits_to_100() {
        let config = FinancialConfig::initial();
        assert_eq!(config.id, FINANCIAL_CONFIG_ID);
        assert_eq!(
            config.teacher_percentage + config.platform_percentage,
            dec!(100)
        );
    }

    #[test]
    fn negative_rate_is_rejected() {
        let mut update = valid_update();
        update.volume_discount_per_hour = dec!(-1);
        assert!(update.validate().is_err());
    }

    #[test]
    fn percentages_must_sum_to_100() {
        let mut update = valid_update();
        update.platform_percentage = dec!(40);
        assert!(update.validate().is_err());
        update.platform_percentage = dec!(35);
        assert!(update.validate().is_ok());
    }

    #[test]
    fn apply_stamps_audit_fields() {
        let current = FinancialConfig::initial();
        let updated = valid_update().apply_to(&current, "founder-1");
        assert_eq!(updated.id, current.id);
        assert_eq!(updated.teacher_base_rate, dec!(12000));
        assert_eq!(updated.updated_by.as_deref(), Some("founder-1"));
    }
}
