use log::{debug, warn};
use std::sync::Arc;

use super::users_model::Role;
use super::users_traits::{RoleResolverTrait, UserProfileRepositoryTrait};
use crate::errors::{DatabaseError, Error};

/// Resolves user ids to capability levels against the profile store.
///
/// Lookup order: record keyed by the id itself, then a fallback scan for a
/// record whose `uid` field matches. Anything that goes wrong degrades to
/// `Student` instead of propagating; authorization fails safe to least
/// privilege.
pub struct RoleResolver {
    profiles: Arc<dyn UserProfileRepositoryTrait>,
}

impl RoleResolver {
    pub fn new(profiles: Arc<dyn UserProfileRepositoryTrait>) -> Self {
        RoleResolver { profiles }
    }
}

impl RoleResolverTrait for RoleResolver {
    fn resolve_role(&self, user_id: &str) -> Role {
        match self.profiles.get_by_id(user_id) {
            Ok(profile) => profile.role,
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                match self.profiles.find_by_uid(user_id) {
                    Ok(Some(profile)) => {
                        debug!(
                            "resolved role for '{}' via uid fallback (record '{}')",
                            user_id, profile.id
                        );
                        profile.role
                    }
                    Ok(None) => Role::Student,
                    Err(e) => {
                        warn!(
                            "uid fallback lookup for '{}' failed, defaulting to student: {}",
                            user_id, e
                        );
                        Role::Student
                    }
                }
            }
            Err(e) => {
                warn!(
                    "role lookup for '{}' failed, defaulting to student: {}",
                    user_id, e
                );
                Role::Student
            }
        }
    }
}
