//! SQLite storage implementation for the academy back-office.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `academy-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. `academy-core` is database-agnostic and works with traits.
//!
//! ```text
//!       academy-core (domain)
//!               │
//!               ▼
//!      storage-sqlite (this crate)
//!               │
//!               ▼
//!           SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool directly; every write funnels through the
//! single-writer actor in [`db::write_actor`], which wraps each job in an
//! immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod catalog;
pub mod config;
pub mod payments;
pub mod requests;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from academy-core for convenience
pub use academy_core::errors::{DatabaseError, Error, Result};
