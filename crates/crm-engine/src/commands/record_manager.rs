//! Record management facade
//!
//! `RecordManager` owns a store and a clock and exposes one method per record
//! operation. Each call is a logging boundary; the store and the operations
//! underneath only log at debug level.

use std::path::Path;

use crm_core::clock::{Clock, SystemClock};
use crm_core::errors::Result;
use crm_core::model::{CaseStatus, Contact, Opportunity, OpportunityStage, Record};
use crm_core::ops::{account_ops, case_ops, contact_ops, lead_ops, opportunity_ops};
use crm_core::{
    log_op_end, log_op_error, log_op_start, Command, CommandOutcome, Query, RecordId, RecordStore,
};
use crm_store::SqliteStore;

use super::engine_command::apply_engine_command;

/// Facade over a record store
pub struct RecordManager<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl RecordManager<SqliteStore, SystemClock> {
    /// Manager over a SQLite database file, using the wall clock
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the database cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(SqliteStore::open(path)?, SystemClock))
    }
}

impl<S: RecordStore, C: Clock> RecordManager<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn run<T>(&mut self, op: &'static str, f: impl FnOnce(&mut S, &C) -> Result<T>) -> Result<T> {
        log_op_start!(op);
        let start = std::time::Instant::now();

        let result = f(&mut self.store, &self.clock);

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!(op, duration_ms = elapsed),
            Err(e) => log_op_error!(op, e.clone(), duration_ms = elapsed),
        }
        result
    }

    /// Run any command through the logged boundary
    ///
    /// # Errors
    ///
    /// Returns the operation's error unchanged.
    pub fn execute(&mut self, cmd: Command) -> Result<CommandOutcome> {
        apply_engine_command(cmd, &mut self.store, &self.clock)
    }

    /// Fetch one record by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record of kind `R` has this id.
    pub fn get<R: Record>(&self, id: &RecordId) -> Result<R> {
        self.store.get(id)
    }

    /// Every record of kind `R`, in insertion order
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        self.store.query(&Query::all())
    }

    // ===== Accounts =====

    /// # Errors
    ///
    /// Returns a validation error for a blank or oversized name.
    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        industry: Option<String>,
    ) -> Result<RecordId> {
        let name = name.into();
        self.run("create_account", |store, _| {
            account_ops::create_account(store, name, industry)
        })
    }

    /// # Errors
    ///
    /// Propagates store errors.
    pub fn insert_new_account(&mut self) -> Result<RecordId> {
        self.run("insert_new_account", |store, clock| {
            account_ops::insert_new_account(store, clock)
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no Account has this id.
    pub fn update_account_industry(
        &mut self,
        id: &RecordId,
        industry: impl Into<String>,
    ) -> Result<()> {
        let industry = industry.into();
        self.run("update_account_industry", |store, _| {
            account_ops::update_account_industry(store, id, industry)
        })
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn upsert_account(&mut self, name: &str) -> Result<RecordId> {
        self.run("upsert_account", |store, _| account_ops::upsert_account(store, name))
    }

    // ===== Contacts =====

    /// # Errors
    ///
    /// Returns a validation error for a blank last name, or `InvalidReference`.
    pub fn create_contact(
        &mut self,
        last_name: impl Into<String>,
        account_id: Option<RecordId>,
    ) -> Result<RecordId> {
        let last_name = last_name.into();
        self.run("create_contact", |store, _| {
            contact_ops::create_contact(store, last_name, account_id)
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no Contact has this id.
    pub fn update_contact_last_name(
        &mut self,
        id: &RecordId,
        last_name: impl Into<String>,
    ) -> Result<()> {
        let last_name = last_name.into();
        self.run("update_contact_last_name", |store, _| {
            contact_ops::update_contact_last_name(store, id, last_name)
        })
    }

    /// # Errors
    ///
    /// Propagates store errors.
    pub fn upsert_accounts_with_contacts(
        &mut self,
        contacts: Vec<Contact>,
    ) -> Result<Vec<RecordId>> {
        self.run("upsert_accounts_with_contacts", |store, _| {
            contact_ops::upsert_accounts_with_contacts(store, contacts)
        })
    }

    // ===== Opportunities =====

    /// # Errors
    ///
    /// Returns a validation error for a blank name, or `InvalidReference`.
    pub fn create_opportunity(
        &mut self,
        name: impl Into<String>,
        account_id: Option<RecordId>,
    ) -> Result<RecordId> {
        let name = name.into();
        self.run("create_opportunity", |store, clock| {
            opportunity_ops::create_opportunity(store, clock, name, account_id)
        })
    }

    /// # Errors
    ///
    /// Propagates store errors.
    pub fn upsert_opportunities(
        &mut self,
        account_name: &str,
        names: &[String],
    ) -> Result<Vec<RecordId>> {
        self.run("upsert_opportunities", |store, clock| {
            opportunity_ops::upsert_opportunities(store, clock, account_name, names)
        })
    }

    /// # Errors
    ///
    /// Propagates store errors.
    pub fn upsert_opportunity_list(
        &mut self,
        opportunities: Vec<Opportunity>,
    ) -> Result<Vec<RecordId>> {
        self.run("upsert_opportunity_list", |store, clock| {
            opportunity_ops::upsert_opportunity_list(store, clock, opportunities)
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no Opportunity has this id.
    pub fn update_opportunity_stage(
        &mut self,
        id: &RecordId,
        stage: OpportunityStage,
    ) -> Result<()> {
        self.run("update_opportunity_stage", |store, _| {
            opportunity_ops::update_opportunity_stage(store, id, stage)
        })
    }

    // ===== Leads =====

    /// # Errors
    ///
    /// Returns a validation error for a blank last name.
    pub fn create_lead(&mut self, last_name: impl Into<String>) -> Result<RecordId> {
        let last_name = last_name.into();
        self.run("create_lead", |store, _| lead_ops::create_lead(store, last_name))
    }

    /// # Errors
    ///
    /// Propagates store errors from the insert or the delete.
    pub fn insert_and_delete_leads(&mut self, last_names: &[String]) -> Result<Vec<RecordId>> {
        self.run("insert_and_delete_leads", |store, _| {
            lead_ops::insert_and_delete_leads(store, last_names)
        })
    }

    // ===== Cases =====

    /// # Errors
    ///
    /// Returns a validation error for a blank subject, or `InvalidReference`.
    pub fn create_case(
        &mut self,
        subject: impl Into<String>,
        account_id: Option<RecordId>,
    ) -> Result<RecordId> {
        let subject = subject.into();
        self.run("create_case", |store, _| {
            case_ops::create_case(store, subject, account_id)
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no Case has this id.
    pub fn update_case_status(&mut self, id: &RecordId, status: CaseStatus) -> Result<()> {
        self.run("update_case_status", |store, _| {
            case_ops::update_case_status(store, id, status)
        })
    }
}
