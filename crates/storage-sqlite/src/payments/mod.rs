//! SQLite storage implementation for the instructor payment ledger.

mod model;
mod repository;

pub use model::InstructorPaymentDB;
pub use repository::InstructorPaymentRepository;
