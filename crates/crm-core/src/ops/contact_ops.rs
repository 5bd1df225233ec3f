use crm_core_types::RecordId;

use super::account_ops::resolve_accounts_by_name;
use super::store::RecordStore;
use crate::errors::Result;
use crate::model::Contact;

/// Create a Contact, optionally linked to an Account
///
/// # Errors
/// * `MissingRequiredField` - If last_name is blank
/// * `InvalidReference` - If account_id does not name an existing Account
pub fn create_contact<S: RecordStore>(
    store: &mut S,
    last_name: String,
    account_id: Option<RecordId>,
) -> Result<RecordId> {
    let mut contact = Contact::new(last_name);
    contact.account_id = account_id;

    store.insert_one(&mut contact)
}

/// Change a Contact's last name
///
/// # Errors
/// * `NotFound` - If no Contact has this id
/// * `MissingRequiredField` - If last_name is blank
pub fn update_contact_last_name<S: RecordStore>(
    store: &mut S,
    id: &RecordId,
    last_name: String,
) -> Result<()> {
    let mut contact: Contact = store.get(id)?;
    contact.last_name = last_name;

    store.update(&[contact])
}

/// Link each Contact to the Account named after its last name, then save them
///
/// Distinct last names are resolved to Accounts first (one Account per name,
/// created where missing), so Contacts sharing a last name share an Account.
/// Every Contact's `account_id` is then overwritten from that mapping and all
/// Contacts are written in one upsert.
///
/// # Returns
/// Contact ids in input order
///
/// # Errors
/// Propagates store errors; a blank last name fails Account validation.
pub fn upsert_accounts_with_contacts<S: RecordStore>(
    store: &mut S,
    mut contacts: Vec<Contact>,
) -> Result<Vec<RecordId>> {
    if contacts.is_empty() {
        return Ok(Vec::new());
    }

    let accounts = resolve_accounts_by_name(store, contacts.iter().map(|c| c.last_name.as_str()))?;
    let account_ids = accounts.id_map();

    for contact in &mut contacts {
        contact.account_id = account_ids.get(&contact.last_name).cloned();
    }

    store.upsert(&mut contacts)
}
