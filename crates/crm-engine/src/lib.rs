//! CRM Engine - Orchestration layer
//!
//! Wraps the record operations in a logged boundary: every public entry point
//! emits exactly one start event and one end (or end_error) event. Nothing
//! below this layer emits boundary events.

pub mod commands;

pub use commands::engine_command::apply_engine_command;
pub use commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
pub use commands::record_manager::RecordManager;
