use log::info;
use std::sync::Arc;

use super::users_model::{NewUserProfile, Role, UserProfile};
use super::users_traits::{RoleResolverTrait, UserProfileRepositoryTrait, UserServiceTrait};
use crate::errors::Result;

/// Service for administering user profiles and roles.
pub struct UserService {
    repository: Arc<dyn UserProfileRepositoryTrait>,
    roles: Arc<dyn RoleResolverTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserProfileRepositoryTrait>,
        roles: Arc<dyn RoleResolverTrait>,
    ) -> Self {
        UserService { repository, roles }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.repository.get_by_id(user_id)
    }

    fn list_profiles(&self) -> Result<Vec<UserProfile>> {
        self.repository.list()
    }

    fn find_by_uid(&self, uid: &str) -> Result<Option<UserProfile>> {
        self.repository.find_by_uid(uid)
    }

    async fn upsert_profile(
        &self,
        actor_id: &str,
        profile: NewUserProfile,
    ) -> Result<UserProfile> {
        self.roles.ensure_manager(actor_id)?;
        profile.validate()?;
        let saved = self.repository.upsert(profile).await?;
        info!(
            "profile '{}' saved with role {} by '{}'",
            saved.id, saved.role, actor_id
        );
        Ok(saved)
    }

    async fn set_role(&self, actor_id: &str, user_id: &str, role: Role) -> Result<UserProfile> {
        self.roles.ensure_manager(actor_id)?;
        let updated = self.repository.set_role(user_id, role).await?;
        info!("role of '{}' set to {} by '{}'", user_id, role, actor_id);
        Ok(updated)
    }
}
