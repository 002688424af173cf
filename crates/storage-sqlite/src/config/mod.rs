//! SQLite storage implementation for the financial configuration singleton.

mod model;
mod repository;

pub use model::FinancialConfigDB;
pub use repository::FinancialConfigRepository;
