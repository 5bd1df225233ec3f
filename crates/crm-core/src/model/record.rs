use crm_core_types::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::EntityKind;
use crate::errors::{CrmError, Result};

/// Longest accepted value for name-like fields
pub const NAME_MAX_LEN: usize = 255;

/// Longest accepted value for person last names
pub const LAST_NAME_MAX_LEN: usize = 80;

/// A flat record a store can persist
///
/// Stores see records through their serde form: the serialized field names
/// are the names filters and natural keys refer to.
pub trait Record: Clone + std::fmt::Debug + Serialize + DeserializeOwned {
    /// Kind of entity this type represents
    const KIND: EntityKind;

    /// Store-assigned id, `None` until the record is persisted
    fn id(&self) -> Option<&RecordId>;

    /// Record the id assigned by the store
    fn set_id(&mut self, id: RecordId);

    /// Reference to the owning account, for kinds that carry one
    fn account_id(&self) -> Option<&RecordId> {
        None
    }

    /// Check required fields
    ///
    /// Stores call this before every write.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` or `InvalidField` naming the first offending field.
    fn validate(&self) -> Result<()>;

    /// Serialized view of the record
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the record cannot be encoded.
    fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a record from its serialized view
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the row does not describe this kind.
    fn from_json(row: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(row)?)
    }

    /// Value of one serialized field, `None` if the field does not exist
    fn field(&self, name: &str) -> Option<serde_json::Value> {
        self.to_json().ok()?.get(name).cloned()
    }
}

/// Validate a required text field: non-blank and at most `max_len` characters
pub(crate) fn require_text(
    kind: EntityKind,
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CrmError::MissingRequiredField { kind, field });
    }

    let len = value.chars().count();
    if len > max_len {
        return Err(CrmError::InvalidField {
            kind,
            field,
            reason: format!("{} characters exceeds the limit of {}", len, max_len),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        let result = require_text(EntityKind::Account, "name", "  \t", NAME_MAX_LEN);
        assert!(matches!(
            result,
            Err(CrmError::MissingRequiredField { field: "name", .. })
        ));
    }

    #[test]
    fn test_require_text_counts_chars_not_bytes() {
        let value = "é".repeat(LAST_NAME_MAX_LEN);
        assert!(require_text(EntityKind::Contact, "last_name", &value, LAST_NAME_MAX_LEN).is_ok());

        let too_long = "é".repeat(LAST_NAME_MAX_LEN + 1);
        assert!(matches!(
            require_text(EntityKind::Contact, "last_name", &too_long, LAST_NAME_MAX_LEN),
            Err(CrmError::InvalidField { .. })
        ));
    }
}
