use crm_core_types::RecordId;

use super::store::RecordStore;
use crate::errors::Result;
use crate::model::{Lead, LeadStatus};

/// Company recorded on leads created without one
pub const PLACEHOLDER_COMPANY: &str = "Placeholder Company";

/// Status of newly created leads
pub const NEW_LEAD_STATUS: LeadStatus = LeadStatus::OpenNotContacted;

fn new_lead(last_name: impl Into<String>) -> Lead {
    Lead::new(last_name, PLACEHOLDER_COMPANY, NEW_LEAD_STATUS)
}

/// Create a Lead with the placeholder company and status "Open - Not Contacted"
///
/// # Errors
/// * `MissingRequiredField` - If last_name is blank
pub fn create_lead<S: RecordStore>(store: &mut S, last_name: String) -> Result<RecordId> {
    store.insert_one(&mut new_lead(last_name))
}

/// Insert one Lead per last name, then delete the same batch
///
/// The delete is addressed by the ids the insert assigned. If the delete
/// fails the inserted Leads stay in the store; nothing compensates.
///
/// # Returns
/// The ids that were inserted and then deleted
///
/// # Errors
/// Propagates store errors from either call.
pub fn insert_and_delete_leads<S: RecordStore>(
    store: &mut S,
    last_names: &[String],
) -> Result<Vec<RecordId>> {
    if last_names.is_empty() {
        return Ok(Vec::new());
    }

    let mut leads: Vec<Lead> = last_names.iter().map(|name| new_lead(name.as_str())).collect();

    let ids = store.insert(&mut leads)?;
    store.delete(&leads)?;

    Ok(ids)
}
