use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use academy_core::errors::{DatabaseError, Error};
use academy_core::users::{NewUserProfile, Role, UserProfile};

use crate::utils::now_micros;

/// Database model for user profiles.
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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDB {
    pub id: String,
    pub uid: Option<String>,
    pub email: Option<String>,
    pub display_name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserProfileDB> for UserProfile {
    type Error = Error;

    fn try_from(db: UserProfileDB) -> Result<Self, Self::Error> {
        let role = db.role.parse::<Role>().map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "profile '{}': {}",
                db.id, e
            )))
        })?;

        Ok(UserProfile {
            id: db.id,
            uid: db.uid,
            email: db.email,
            display_name: db.display_name,
            role,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewUserProfile> for UserProfileDB {
    fn from(profile: NewUserProfile) -> Self {
        let now = now_micros();
        UserProfileDB {
            id: profile.id,
            uid: profile.uid,
            email: profile.email,
            display_name: profile.display_name,
            role: profile.role.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
