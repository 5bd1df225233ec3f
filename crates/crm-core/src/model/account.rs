use crm_core_types::RecordId;
use serde::{Deserialize, Serialize};

use super::record::{require_text, NAME_MAX_LEN};
use super::{EntityKind, Record};
use crate::errors::Result;

/// Account - an organization
///
/// Accounts are looked up by `name` as a natural key, but the store does not
/// enforce name uniqueness; callers query before assuming one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned id, `None` until persisted
    pub id: Option<RecordId>,

    /// Organization name (required)
    pub name: String,

    pub industry: Option<String>,

    pub description: Option<String>,
}

impl Account {
    /// Create an unsaved Account with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            industry: None,
            description: None,
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Record for Account {
    const KIND: EntityKind = EntityKind::Account;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", &self.name, NAME_MAX_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CrmError;

    #[test]
    fn test_new_account() {
        let account = Account::new("Acme").with_industry("Manufacturing");

        assert!(account.id.is_none());
        assert_eq!(account.name, "Acme");
        assert_eq!(account.industry.as_deref(), Some("Manufacturing"));
        assert!(account.description.is_none());
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let result = Account::new("   ").validate();
        assert!(matches!(
            result,
            Err(CrmError::MissingRequiredField {
                kind: EntityKind::Account,
                field: "name"
            })
        ));
    }

    #[test]
    fn test_field_reads_serialized_name() {
        let account = Account::new("Acme");
        assert_eq!(account.field("name"), Some(serde_json::json!("Acme")));
        assert_eq!(account.field("id"), Some(serde_json::Value::Null));
        assert_eq!(account.field("no_such_field"), None);
    }
}
