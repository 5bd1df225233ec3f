//! Core types shared across the CRM crates
//!
//! This crate provides foundational types used by the record model, the
//! stores and the logging facility:
//!
//! - **Record identifiers**: `RecordId`, assigned by a store on first write
//! - **Schema constants**: Canonical field keys and event names

pub mod record_id;
pub mod schema;

pub use record_id::RecordId;
