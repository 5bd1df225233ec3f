use crm_core_types::RecordId;
use serde::{Deserialize, Serialize};

use super::record::{require_text, NAME_MAX_LEN};
use super::{CaseOrigin, CaseStatus, EntityKind, Record};
use crate::errors::Result;

/// Case - a support request, optionally raised by an Account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: Option<RecordId>,

    pub subject: String,

    pub account_id: Option<RecordId>,

    pub status: CaseStatus,

    pub origin: CaseOrigin,
}

impl Case {
    pub fn new(subject: impl Into<String>, status: CaseStatus, origin: CaseOrigin) -> Self {
        Self {
            id: None,
            subject: subject.into(),
            account_id: None,
            status,
            origin,
        }
    }

    pub fn with_account(mut self, account_id: RecordId) -> Self {
        self.account_id = Some(account_id);
        self
    }
}

impl Record for Case {
    const KIND: EntityKind = EntityKind::Case;

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
        require_text(Self::KIND, "subject", &self.subject, NAME_MAX_LEN)
    }
}
