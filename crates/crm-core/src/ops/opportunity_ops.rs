use crm_core_types::RecordId;

use super::account_ops::{resolve_accounts_by_name, resolved_id};
use super::filter::Filter;
use super::resolve::resolve_or_create_by_natural_key;
use super::store::RecordStore;
use crate::clock::{add_months, Clock};
use crate::errors::Result;
use crate::model::{Amount, Opportunity, OpportunityStage};

/// Stage of opportunities created from a name
pub const NEW_OPPORTUNITY_STAGE: OpportunityStage = OpportunityStage::Prospecting;

/// Months from today to the close date of opportunities created from a name
pub const NEW_OPPORTUNITY_CLOSE_MONTHS: u32 = 1;

/// Stage forced by `upsert_opportunity_list`
pub const NORMALIZED_STAGE: OpportunityStage = OpportunityStage::Qualification;

/// Months from today to the close date forced by `upsert_opportunity_list`
pub const NORMALIZED_CLOSE_MONTHS: u32 = 3;

/// Amount forced by `upsert_opportunity_list`
pub const NORMALIZED_AMOUNT: Amount = Amount::from_units(50_000);

/// Create an Opportunity in the Prospecting stage closing one month from today
///
/// # Errors
/// * `MissingRequiredField` - If name is blank
/// * `InvalidReference` - If account_id does not name an existing Account
pub fn create_opportunity<S: RecordStore, C: Clock>(
    store: &mut S,
    clock: &C,
    name: String,
    account_id: Option<RecordId>,
) -> Result<RecordId> {
    let close_date = add_months(clock.today(), NEW_OPPORTUNITY_CLOSE_MONTHS)?;
    let mut opportunity = Opportunity::new(name, NEW_OPPORTUNITY_STAGE, close_date);
    opportunity.account_id = account_id;

    store.insert_one(&mut opportunity)
}

/// Ensure the named Account has one Opportunity per distinct name
///
/// The Account is resolved by exact name and created if missing, so every
/// Opportunity references it. Opportunities are then resolved by name within
/// that Account: existing ones are kept as they are, missing ones are created
/// in the Prospecting stage closing one month from today. Repeated names in
/// `names` and names that already exist never produce duplicates.
///
/// # Returns
/// Opportunity ids in distinct-name order
///
/// # Errors
/// Propagates store errors.
pub fn upsert_opportunities<S: RecordStore, C: Clock>(
    store: &mut S,
    clock: &C,
    account_name: &str,
    names: &[String],
) -> Result<Vec<RecordId>> {
    let accounts = resolve_accounts_by_name(store, [account_name])?;
    let account_id = resolved_id(&accounts, account_name)?;

    let close_date = add_months(clock.today(), NEW_OPPORTUNITY_CLOSE_MONTHS)?;
    let resolved = resolve_or_create_by_natural_key(
        store,
        Filter::eq("account_id", account_id.as_str()),
        "name",
        names,
        |key, existing: Option<Opportunity>| {
            existing.unwrap_or_else(|| {
                Opportunity::new(key, NEW_OPPORTUNITY_STAGE, close_date)
                    .with_account(account_id.clone())
            })
        },
    )?;

    Ok(resolved.ids())
}

/// Normalize and save a list of Opportunities
///
/// Every record, new or existing, gets stage Qualification, a close date three
/// months from today and an amount of 50000, overwriting whatever it held.
/// All records are written in one upsert.
///
/// # Returns
/// Opportunity ids in input order
///
/// # Errors
/// Propagates store errors.
pub fn upsert_opportunity_list<S: RecordStore, C: Clock>(
    store: &mut S,
    clock: &C,
    mut opportunities: Vec<Opportunity>,
) -> Result<Vec<RecordId>> {
    let close_date = add_months(clock.today(), NORMALIZED_CLOSE_MONTHS)?;

    for opportunity in &mut opportunities {
        opportunity.stage = NORMALIZED_STAGE;
        opportunity.close_date = close_date;
        opportunity.amount = Some(NORMALIZED_AMOUNT);
    }

    store.upsert(&mut opportunities)
}

/// Move an Opportunity to another stage
///
/// # Errors
/// * `NotFound` - If no Opportunity has this id
pub fn update_opportunity_stage<S: RecordStore>(
    store: &mut S,
    id: &RecordId,
    stage: OpportunityStage,
) -> Result<()> {
    let mut opportunity: Opportunity = store.get(id)?;
    opportunity.stage = stage;

    store.update(&[opportunity])
}
