use crm_core_types::RecordId;
use serde::{Deserialize, Serialize};

use super::record::{require_text, LAST_NAME_MAX_LEN};
use super::{EntityKind, Record};
use crate::errors::Result;

/// Contact - a person, optionally belonging to an Account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Option<RecordId>,

    /// Last name (required)
    pub last_name: String,

    /// Owning account, by id only
    pub account_id: Option<RecordId>,
}

impl Contact {
    pub fn new(last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            last_name: last_name.into(),
            account_id: None,
        }
    }

    pub fn with_account(mut self, account_id: RecordId) -> Self {
        self.account_id = Some(account_id);
        self
    }
}

impl Record for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn account_id(&self) -> Option<&RecordId> {
        self.account_id.as_ref()
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "last_name", &self.last_name, LAST_NAME_MAX_LEN)
    }
}
