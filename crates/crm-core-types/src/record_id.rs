//! Store-assigned record identifiers
//!
//! A `RecordId` only exists once a record has been persisted. Identifiers
//! start with the three-character key prefix of their entity kind so that an
//! id alone tells which table it belongs to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a persisted record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier with the given key prefix
    ///
    /// The suffix is a UUIDv7 in simple (hyphen-free) form, so ids minted by
    /// one process sort in creation order.
    pub fn generate(key_prefix: &str) -> Self {
        Self(format!("{}{}", key_prefix, Uuid::now_v7().simple()))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key prefix this identifier was minted with
    pub fn key_prefix(&self) -> &str {
        self.0.get(..3).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_generation() {
        let id1 = RecordId::generate("001");
        let id2 = RecordId::generate("001");

        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("001"));
        assert_eq!(id1.as_str().len(), 3 + 32);
    }

    #[test]
    fn test_key_prefix() {
        let id = RecordId::generate("00Q");
        assert_eq!(id.key_prefix(), "00Q");

        let short = RecordId::from("ab");
        assert_eq!(short.key_prefix(), "ab");
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::generate("003");
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_record_id_serializes_as_plain_string() {
        let id = RecordId::from("001abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"001abc\"");

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
