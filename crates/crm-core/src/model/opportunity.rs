use chrono::NaiveDate;
use crm_core_types::RecordId;
use serde::{Deserialize, Serialize};

use super::record::{require_text, NAME_MAX_LEN};
use super::{Amount, EntityKind, OpportunityStage, Record};
use crate::errors::Result;

/// Opportunity - a potential sale tied to an Account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: Option<RecordId>,

    /// Opportunity name (required)
    pub name: String,

    pub account_id: Option<RecordId>,

    pub stage: OpportunityStage,

    pub close_date: NaiveDate,

    pub amount: Option<Amount>,
}

impl Opportunity {
    /// Create an unsaved Opportunity with its required fields
    pub fn new(name: impl Into<String>, stage: OpportunityStage, close_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            account_id: None,
            stage,
            close_date,
            amount: None,
        }
    }

    pub fn with_account(mut self, account_id: RecordId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }
}

impl Record for Opportunity {
    const KIND: EntityKind = EntityKind::Opportunity;

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
        require_text(Self::KIND, "name", &self.name, NAME_MAX_LEN)
    }
}
