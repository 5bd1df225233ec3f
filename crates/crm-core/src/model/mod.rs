pub mod account;
pub mod amount;
pub mod case;
pub mod contact;
pub mod kind;
pub mod lead;
pub mod opportunity;
pub mod picklist;
pub mod record;

pub use account::Account;
pub use amount::Amount;
pub use case::Case;
pub use contact::Contact;
pub use kind::EntityKind;
pub use lead::Lead;
pub use opportunity::Opportunity;
pub use picklist::{CaseOrigin, CaseStatus, LeadStatus, OpportunityStage};
pub use record::Record;
