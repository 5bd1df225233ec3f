use crm_core_types::RecordId;

use super::filter::Filter;
use super::resolve::{resolve_or_create_by_natural_key, Resolved};
use super::store::RecordStore;
use crate::clock::Clock;
use crate::errors::{CrmError, Result};
use crate::model::{Account, Record};

/// Description written when `upsert_account` finds an existing account
pub const UPDATED_ACCOUNT_DESCRIPTION: &str = "Updated Account";

/// Description written when `upsert_account` creates the account
pub const NEW_ACCOUNT_DESCRIPTION: &str = "New Account";

/// Create an Account with exactly the given name and industry
///
/// # Arguments
/// * `store` - Record store to write to
/// * `name` - Account name (must not be blank)
/// * `industry` - Optional industry
///
/// # Returns
/// The id of the new Account
///
/// # Errors
/// * `MissingRequiredField` - If name is blank
/// * `InvalidField` - If name is longer than the store accepts
pub fn create_account<S: RecordStore>(
    store: &mut S,
    name: String,
    industry: Option<String>,
) -> Result<RecordId> {
    let mut account = Account::new(name);
    account.industry = industry;

    store.insert_one(&mut account)
}

/// Create an Account named after the current instant
///
/// The name is `"Account <timestamp>"` with nanosecond precision. If an
/// Account with that name already exists (a frozen clock, or two calls in
/// the same nanosecond) a ` (n)` suffix is appended until the name is free.
///
/// # Errors
/// Propagates store errors.
pub fn insert_new_account<S: RecordStore, C: Clock>(store: &mut S, clock: &C) -> Result<RecordId> {
    let base = format!(
        "Account {}",
        clock.now().format("%Y-%m-%d %H:%M:%S%.9f")
    );

    let mut name = base.clone();
    let mut suffix = 1;
    while store.count::<Account>(&Filter::eq("name", name.as_str()))? > 0 {
        suffix += 1;
        name = format!("{} ({})", base, suffix);
    }

    store.insert_one(&mut Account::new(name))
}

/// Set an Account's industry
///
/// # Errors
/// * `NotFound` - If no Account has this id
pub fn update_account_industry<S: RecordStore>(
    store: &mut S,
    id: &RecordId,
    industry: String,
) -> Result<()> {
    let mut account: Account = store.get(id)?;
    account.industry = Some(industry);

    store.update(&[account])
}

/// Insert or update the Account with the given name
///
/// Looks the name up first (exact match). On a hit the existing Account's
/// description becomes "Updated Account"; otherwise a new Account is created
/// with description "New Account". Either way exactly one record is written
/// and no duplicate name is created.
///
/// # Errors
/// * `MissingRequiredField` - If name is blank
pub fn upsert_account<S: RecordStore>(store: &mut S, name: &str) -> Result<RecordId> {
    let resolved = resolve_or_create_by_natural_key(
        store,
        Filter::All,
        "name",
        [name],
        |key, existing: Option<Account>| match existing {
            Some(account) => account.with_description(UPDATED_ACCOUNT_DESCRIPTION),
            None => Account::new(key).with_description(NEW_ACCOUNT_DESCRIPTION),
        },
    )?;

    resolved_id(&resolved, name)
}

/// Resolve-or-create one Account per distinct name, leaving found Accounts unchanged
///
/// # Errors
/// Propagates store errors.
pub fn resolve_accounts_by_name<S, K>(store: &mut S, names: K) -> Result<Resolved<Account>>
where
    S: RecordStore,
    K: IntoIterator,
    K::Item: AsRef<str>,
{
    resolve_or_create_by_natural_key(
        store,
        Filter::All,
        "name",
        names,
        |key, existing: Option<Account>| existing.unwrap_or_else(|| Account::new(key)),
    )
}

pub(crate) fn resolved_id<R: Record>(resolved: &Resolved<R>, key: &str) -> Result<RecordId> {
    resolved
        .id_of(key)
        .cloned()
        .ok_or_else(|| CrmError::Persistence {
            message: format!("upsert returned no {} id for key {:?}", R::KIND, key),
        })
}
