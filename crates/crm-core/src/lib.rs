//! CRM Core - record model and operations
//!
//! This crate holds everything that does not depend on a particular backend:
//! - Typed records (Account, Contact, Opportunity, Lead, Case) and picklists
//! - The `RecordStore` trait and an in-memory implementation
//! - Record operations, including resolve-or-create by natural key
//! - The `Command` inventory and `apply()` dispatch
//! - Error and logging facilities shared by the other crates

pub mod apply;
pub mod clock;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;

// Re-export commonly used types
pub use apply::apply;
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{Command, CommandOutcome};
pub use crm_core_types::RecordId;
pub use errors::{CrmError, ExError, ExErrorKind, Result};
pub use model::{Account, Case, Contact, EntityKind, Lead, Opportunity, Record};
pub use ops::{Filter, InMemoryStore, Query, RecordStore};
