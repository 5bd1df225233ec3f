//! Subcommands, one module per record kind

pub mod account;
pub mod case;
pub mod contact;
pub mod lead;
pub mod list;
pub mod opportunity;

use crm_core::RecordId;

/// Store backing the CLI
pub type Manager = crm_engine::RecordManager<crm_store::SqliteStore>;

pub(crate) fn print_id(id: &RecordId) {
    println!("{}", id);
}

pub(crate) fn print_ids(ids: &[RecordId]) {
    for id in ids {
        print_id(id);
    }
}
