use crm_core_types::RecordId;
use serde::{Deserialize, Serialize};

use super::record::{require_text, LAST_NAME_MAX_LEN, NAME_MAX_LEN};
use super::{EntityKind, LeadStatus, Record};
use crate::errors::Result;

/// Lead - an unqualified prospect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Option<RecordId>,

    pub last_name: String,

    pub company: String,

    pub status: LeadStatus,
}

impl Lead {
    pub fn new(
        last_name: impl Into<String>,
        company: impl Into<String>,
        status: LeadStatus,
    ) -> Self {
        Self {
            id: None,
            last_name: last_name.into(),
            company: company.into(),
            status,
        }
    }
}

impl Record for Lead {
    const KIND: EntityKind = EntityKind::Lead;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "last_name", &self.last_name, LAST_NAME_MAX_LEN)?;
        require_text(Self::KIND, "company", &self.company, NAME_MAX_LEN)
    }
}
