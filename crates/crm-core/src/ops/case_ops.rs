use crm_core_types::RecordId;

use super::store::RecordStore;
use crate::errors::Result;
use crate::model::{Case, CaseOrigin, CaseStatus};

pub const NEW_CASE_STATUS: CaseStatus = CaseStatus::New;

pub const NEW_CASE_ORIGIN: CaseOrigin = CaseOrigin::Web;

/// Open a Case with status "New" and origin "Web"
///
/// # Errors
/// * `MissingRequiredField` - If subject is blank
/// * `InvalidReference` - If account_id does not name an existing Account
pub fn create_case<S: RecordStore>(
    store: &mut S,
    subject: String,
    account_id: Option<RecordId>,
) -> Result<RecordId> {
    let mut case = Case::new(subject, NEW_CASE_STATUS, NEW_CASE_ORIGIN);
    case.account_id = account_id;

    store.insert_one(&mut case)
}

/// Change a Case's status
///
/// # Errors
/// * `NotFound` - If no Case has this id
pub fn update_case_status<S: RecordStore>(
    store: &mut S,
    id: &RecordId,
    status: CaseStatus,
) -> Result<()> {
    let mut case: Case = store.get(id)?;
    case.status = status;

    store.update(&[case])
}
