pub mod account_ops;
pub mod case_ops;
pub mod contact_ops;
pub mod filter;
pub mod lead_ops;
pub mod memory_store;
pub mod opportunity_ops;
pub mod resolve;
pub mod store;

pub use filter::{Filter, Query};
pub use memory_store::InMemoryStore;
pub use resolve::{resolve_or_create_by_natural_key, Resolved};
pub use store::RecordStore;
