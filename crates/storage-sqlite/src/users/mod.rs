//! SQLite storage implementation for user profiles.

mod model;
mod repository;

pub use model::UserProfileDB;
pub use repository::UserProfileRepository;
