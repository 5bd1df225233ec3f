//! Command orchestration layer.
//!
//! Provides the logged entry points that coordinate core operations with a
//! record store.

pub mod engine_command;
pub mod engine_query;
pub mod record_manager;
