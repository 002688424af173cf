//! User profile and role domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// Capability level attached to a user profile.
///
/// Anything unknown resolves to `Student`, the least-privileged level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default capability: may browse, nothing more.
    #[default]
    Student,
    /// May claim and complete service requests.
    Instructor,
    /// Full administrative and financial access.
    Founder,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Founder => "founder",
        }
    }

    /// Catalog writes, request creation/cancellation, config updates,
    /// settlement, and role administration.
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Founder)
    }

    /// Claiming and completing requests. Founders keep every instructor
    /// capability; small academies' founders teach too.
    pub fn can_claim(&self) -> bool {
        matches!(self, Role::Instructor | Role::Founder)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "instructor" => Ok(Role::Instructor),
            "founder" => Ok(Role::Founder),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model for a user profile record.
///
/// `id` is ideally the identity-provider id. Historical records were created
/// under an auto-generated key with the provider id kept in `uid`; the role
/// resolver falls back to a `uid` scan for those.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub uid: Option<String>,
    pub email: Option<String>,
    pub display_name: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating or replacing a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserProfile {
    pub id: String,
    pub uid: Option<String>,
    pub email: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub role: Role,
}

impl NewUserProfile {
    /// Validates the profile data before any write.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.display_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "displayName".to_string(),
            )));
        }
        Ok(())
    }
}
