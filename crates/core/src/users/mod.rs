//! Users module - profiles, roles, and the role resolver.

mod role_resolver;
mod users_model;
mod users_service;
mod users_traits;


// Re-export the public interface
pub use role_resolver::RoleResolver;
pub use users_model::{NewUserProfile, Role, UserProfile};
pub use users_service::UserService;
pub use users_traits::{RoleResolverTrait, UserProfileRepositoryTrait, UserServiceTrait};
