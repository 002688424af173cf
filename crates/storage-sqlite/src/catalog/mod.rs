//! SQLite storage implementation for the service catalog.

mod model;
mod repository;

pub use model::ServiceDB;
pub use repository::ServiceRepository;
