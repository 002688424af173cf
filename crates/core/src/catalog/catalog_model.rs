//! Service catalog domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Domain model for a bookable service offering.
///
/// `students` and `hours` describe the engagement the advertised price was
/// designed for; a request booked against the service records its own actual
/// hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub students: i32,
    pub hours: i32,
    pub price_per_student: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new service offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub students: i32,
    pub hours: i32,
    pub price_per_student: Decimal,
}

impl NewService {
    /// Validates the new service data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service name cannot be empty".to_string(),
            )));
        }
        if self.students < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service must cover at least one student".to_string(),
            )));
        }
        if self.hours < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service must cover at least one hour".to_string(),
            )));
        }
        if self.price_per_student < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price per student cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing service offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub id: Option<String>,
    pub name: String,
    pub students: i32,
    pub hours: i32,
    pub price_per_student: Decimal,
}

impl ServiceUpdate {
    /// Validates the service update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service name cannot be empty".to_string(),
            )));
        }
        if self.students < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service must cover at least one student".to_string(),
            )));
        }
        if self.hours < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Service must cover at least one hour".to_string(),
            )));
        }
        if self.price_per_student < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price per student cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}
