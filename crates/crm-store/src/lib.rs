//! CRM Store - SQLite persistence for records
//!
//! Provides:
//! - SQLite schema with a checksummed migrations framework
//! - `SqliteStore`, a `RecordStore` backed by one SQLite connection
//! - Translation of record filters into SQL

pub mod db;
pub mod errors;
pub mod migrations;
pub mod sqlite;

// Re-export key types
pub use errors::Result;
pub use sqlite::SqliteStore;
