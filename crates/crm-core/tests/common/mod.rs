use chrono::NaiveDate;
use crm_core::model::{Account, Contact, Opportunity};
use crm_core::{FixedClock, InMemoryStore, Query, RecordStore};

/// Reference date shared by tests: the last day of January in a leap year,
/// so month arithmetic exercises end-of-month clamping.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    date(2024, 1, 31)
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(dead_code)]
pub fn clock() -> FixedClock {
    FixedClock::at_date(today())
}

#[allow(dead_code)]
pub fn new_store() -> InMemoryStore {
    InMemoryStore::new()
}

#[allow(dead_code)]
pub fn all_accounts(store: &InMemoryStore) -> Vec<Account> {
    store.query(&Query::all()).unwrap()
}

#[allow(dead_code)]
pub fn all_contacts(store: &InMemoryStore) -> Vec<Contact> {
    store.query(&Query::all()).unwrap()
}

#[allow(dead_code)]
pub fn all_opportunities(store: &InMemoryStore) -> Vec<Opportunity> {
    store.query(&Query::all()).unwrap()
}

#[allow(dead_code)]
pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
