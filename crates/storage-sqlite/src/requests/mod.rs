//! SQLite storage implementation for the service request lifecycle.

mod model;
mod repository;

pub use model::ServiceRequestDB;
pub use repository::ServiceRequestRepository;
