//! Command dispatch
//!
//! `apply()` routes a `Command` to its operation. Each operation reads and
//! writes only through the given store, so a failed command leaves every
//! batch it did not reach untouched.
//!
//! ## Example
//!
//! ```
//! use crm_core::clock::SystemClock;
//! use crm_core::{apply, Command, CommandOutcome, InMemoryStore};
//!
//! let mut store = InMemoryStore::new();
//! let cmd = Command::AccountCreate {
//!     name: "Acme".to_string(),
//!     industry: None,
//! };
//!
//! let outcome = apply(&mut store, &SystemClock, cmd).unwrap();
//! assert!(matches!(outcome, CommandOutcome::Id(_)));
//! ```

use crate::clock::Clock;
use crate::commands::{Command, CommandOutcome};
use crate::errors::Result;
use crate::ops::{account_ops, case_ops, contact_ops, lead_ops, opportunity_ops, RecordStore};

/// Run a command against a store
///
/// # Arguments
///
/// * `store` - Store the operation reads and writes
/// * `clock` - Time source for derived dates and generated names
/// * `cmd` - Command to execute
///
/// # Errors
///
/// Returns whatever the underlying operation returns. See `CrmError` for the
/// full taxonomy.
pub fn apply<S: RecordStore, C: Clock>(
    store: &mut S,
    clock: &C,
    cmd: Command,
) -> Result<CommandOutcome> {
    match cmd {
        Command::AccountCreate { name, industry } => {
            account_ops::create_account(store, name, industry).map(CommandOutcome::Id)
        }

        Command::AccountInsertNew => {
            account_ops::insert_new_account(store, clock).map(CommandOutcome::Id)
        }

        Command::AccountUpdateIndustry {
            account_id,
            industry,
        } => {
            account_ops::update_account_industry(store, &account_id, industry)?;
            Ok(CommandOutcome::Updated)
        }

        Command::AccountUpsert { name } => {
            account_ops::upsert_account(store, &name).map(CommandOutcome::Id)
        }

        Command::ContactCreate {
            last_name,
            account_id,
        } => contact_ops::create_contact(store, last_name, account_id).map(CommandOutcome::Id),

        Command::ContactUpdateLastName {
            contact_id,
            last_name,
        } => {
            contact_ops::update_contact_last_name(store, &contact_id, last_name)?;
            Ok(CommandOutcome::Updated)
        }

        Command::ContactUpsertWithAccounts { contacts } => {
            contact_ops::upsert_accounts_with_contacts(store, contacts).map(CommandOutcome::Ids)
        }

        Command::OpportunityCreate { name, account_id } => {
            opportunity_ops::create_opportunity(store, clock, name, account_id)
                .map(CommandOutcome::Id)
        }

        Command::OpportunityUpsertForAccount {
            account_name,
            names,
        } => opportunity_ops::upsert_opportunities(store, clock, &account_name, &names)
            .map(CommandOutcome::Ids),

        Command::OpportunityUpsertList { opportunities } => {
            opportunity_ops::upsert_opportunity_list(store, clock, opportunities)
                .map(CommandOutcome::Ids)
        }

        Command::OpportunityUpdateStage {
            opportunity_id,
            stage,
        } => {
            opportunity_ops::update_opportunity_stage(store, &opportunity_id, stage)?;
            Ok(CommandOutcome::Updated)
        }

        Command::LeadCreate { last_name } => {
            lead_ops::create_lead(store, last_name).map(CommandOutcome::Id)
        }

        Command::LeadInsertAndDelete { last_names } => {
            lead_ops::insert_and_delete_leads(store, &last_names).map(CommandOutcome::Ids)
        }

        Command::CaseCreate {
            subject,
            account_id,
        } => case_ops::create_case(store, subject, account_id).map(CommandOutcome::Id),

        Command::CaseUpdateStatus { case_id, status } => {
            case_ops::update_case_status(store, &case_id, status)?;
            Ok(CommandOutcome::Updated)
        }
    }
}
