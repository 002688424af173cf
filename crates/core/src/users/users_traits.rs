//! User profile repository and service traits.
//!
//! These traits define the contract for profile and role operations without
//! any database-specific types, allowing for different storage
//! implementations.

use async_trait::async_trait;

use super::users_model::{NewUserProfile, Role, UserProfile};
use crate::errors::{Error, Result};

/// Trait defining the contract for profile persistence.
#[async_trait]
pub trait UserProfileRepositoryTrait: Send + Sync {
    /// Retrieves a profile by its record id.
    fn get_by_id(&self, user_id: &str) -> Result<UserProfile>;

    /// Scans for a profile whose `uid` field equals the given value.
    ///
    /// Tolerates historical records created under an auto-generated id with
    /// the identity-provider id stored in `uid`.
    fn find_by_uid(&self, uid: &str) -> Result<Option<UserProfile>>;

    /// Lists all profiles.
    fn list(&self) -> Result<Vec<UserProfile>>;

    /// Creates the profile, or replaces its mutable fields if the id exists.
    async fn upsert(&self, profile: NewUserProfile) -> Result<UserProfile>;

    /// Changes the role on an existing profile.
    async fn set_role(&self, user_id: &str, role: Role) -> Result<UserProfile>;
}

/// Resolves the capability level for an authenticated user id.
///
/// Implemented once and injected into every service that gates an operation;
/// the lookup-with-fallback must not be reimplemented per call site.
pub trait RoleResolverTrait: Send + Sync {
    /// Never fails: missing profiles and lookup errors both degrade to
    /// [`Role::Student`], the least-privileged level.
    fn resolve_role(&self, user_id: &str) -> Role;

    /// Errors with [`Error::Forbidden`] unless the user holds founder access.
    fn ensure_manager(&self, user_id: &str) -> Result<Role> {
        let role = self.resolve_role(user_id);
        if role.can_manage() {
            Ok(role)
        } else {
            Err(Error::Forbidden(format!(
                "user '{}' does not hold founder access",
                user_id
            )))
        }
    }

    /// Errors with [`Error::Forbidden`] unless the user may claim requests.
    fn ensure_claimant(&self, user_id: &str) -> Result<Role> {
        let role = self.resolve_role(user_id);
        if role.can_claim() {
            Ok(role)
        } else {
            Err(Error::Forbidden(format!(
                "user '{}' does not hold instructor access",
                user_id
            )))
        }
    }
}

/// Trait defining the contract for profile administration.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Retrieves a profile by record id.
    fn get_profile(&self, user_id: &str) -> Result<UserProfile>;

    /// Lists all profiles.
    fn list_profiles(&self) -> Result<Vec<UserProfile>>;

    /// Finds a profile by its `uid` field (mismatched-key diagnostics).
    fn find_by_uid(&self, uid: &str) -> Result<Option<UserProfile>>;

    /// Creates or replaces a profile. Founder-gated.
    async fn upsert_profile(
        &self,
        actor_id: &str,
        profile: NewUserProfile,
    ) -> Result<UserProfile>;

    /// Changes a user's role. Founder-gated.
    async fn set_role(&self, actor_id: &str, user_id: &str, role: Role) -> Result<UserProfile>;
}
