use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::UserProfileDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::schema::users::dsl::*;
use crate::utils::now_micros;
use academy_core::errors::Result;
use academy_core::users::{NewUserProfile, Role, UserProfile, UserProfileRepositoryTrait};

pub struct UserProfileRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserProfileRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserProfileRepository { pool, writer }
    }
}

#[async_trait]
impl UserProfileRepositoryTrait for UserProfileRepository {
    fn get_by_id(&self, user_id: &str) -> Result<UserProfile> {
        let mut conn = get_connection(&self.pool)?;
        let profile_db = users
            .find(user_id)
            .first::<UserProfileDB>(&mut conn)
            .map_err(StorageError::from)?;
        profile_db.try_into()
    }

    fn find_by_uid(&self, uid_param: &str) -> Result<Option<UserProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let profile_db = users
            .filter(uid.eq(uid_param))
            .first::<UserProfileDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        profile_db.map(UserProfile::try_from).transpose()
    }

    fn list(&self) -> Result<Vec<UserProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let profiles_db = users
            .order(display_name.asc())
            .load::<UserProfileDB>(&mut conn)
            .map_err(StorageError::from)?;
        profiles_db.into_iter().map(UserProfile::try_from).collect()
    }

    async fn upsert(&self, profile: NewUserProfile) -> Result<UserProfile> {
        let profile_db: UserProfileDB = profile.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserProfile> {
                // Existing rows keep their created_at; only the mutable fields
                // and updated_at are replaced.
                diesel::insert_into(users::table)
                    .values(&profile_db)
                    .on_conflict(users::id)
                    .do_update()
                    .set((
                        users::uid.eq(profile_db.uid.clone()),
                        users::email.eq(profile_db.email.clone()),
                        users::display_name.eq(profile_db.display_name.clone()),
                        users::role.eq(profile_db.role.clone()),
                        users::updated_at.eq(profile_db.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result_db = users
                    .find(&profile_db.id)
                    .first::<UserProfileDB>(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }

    async fn set_role(&self, user_id: &str, new_role: Role) -> Result<UserProfile> {
        let user_id_owned = user_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserProfile> {
                let result_db = diesel::update(users.find(&user_id_owned))
                    .set((
                        role.eq(new_role.as_str()),
                        updated_at.eq(now_micros()),
                    ))
                    .get_result::<UserProfileDB>(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }
}
