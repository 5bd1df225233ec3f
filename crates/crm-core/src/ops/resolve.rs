//! Resolve-or-create by natural key
//!
//! The one primitive behind every "find it by name or make it" operation:
//! look up existing records by the exact key values, let the caller adjust
//! or construct each record, then write them all in one upsert.

use std::collections::{HashMap, HashSet};

use crm_core_types::RecordId;

use super::filter::{Filter, Query};
use super::store::RecordStore;
use crate::errors::Result;
use crate::model::Record;

/// Outcome of a resolve-or-create call
///
/// Holds one persisted record per distinct key, in the order keys first
/// appeared in the input.
#[derive(Debug, Clone)]
pub struct Resolved<R> {
    entries: Vec<(String, R)>,
    created: usize,
}

impl<R: Record> Resolved<R> {
    /// Record resolved for `key`
    pub fn get(&self, key: &str) -> Option<&R> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    /// Id of the record resolved for `key`
    pub fn id_of(&self, key: &str) -> Option<&RecordId> {
        self.get(key).and_then(|r| r.id())
    }

    /// Key to id mapping
    pub fn id_map(&self) -> HashMap<String, RecordId> {
        self.entries
            .iter()
            .filter_map(|(k, r)| r.id().map(|id| (k.clone(), id.clone())))
            .collect()
    }

    /// Ids in key order
    pub fn ids(&self) -> Vec<RecordId> {
        self.entries
            .iter()
            .filter_map(|(_, r)| r.id().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many keys needed a new record
    pub fn created(&self) -> usize {
        self.created
    }

    /// How many keys matched an existing record
    pub fn matched(&self) -> usize {
        self.entries.len() - self.created
    }
}

/// Resolve each distinct key to exactly one persisted record
///
/// 1. Collect the distinct keys in first-appearance order.
/// 2. Query once for records matching `scope AND key_field IN keys`. Matching
///    is exact and case-sensitive. If the store already holds several records
///    with the same key, the oldest one is used.
/// 3. Call `prepare(key, existing)` for every key. It returns the record to
///    write: an adjusted copy of `existing`, or a new record when `existing`
///    is `None`. A new record's `key_field` must equal `key`.
/// 4. Upsert every prepared record in one call.
///
/// An empty key list makes no store calls.
///
/// # Errors
///
/// Propagates any store error unchanged.
pub fn resolve_or_create_by_natural_key<S, R, K, F>(
    store: &mut S,
    scope: Filter,
    key_field: &str,
    keys: K,
    mut prepare: F,
) -> Result<Resolved<R>>
where
    S: RecordStore,
    R: Record,
    K: IntoIterator,
    K::Item: AsRef<str>,
    F: FnMut(&str, Option<R>) -> R,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut distinct: Vec<String> = Vec::new();
    for key in keys {
        let key = key.as_ref();
        if seen.insert(key.to_string()) {
            distinct.push(key.to_string());
        }
    }

    if distinct.is_empty() {
        return Ok(Resolved {
            entries: Vec::new(),
            created: 0,
        });
    }

    let filter = scope.and(Filter::is_in(key_field, distinct.iter().map(String::as_str)));
    let existing_rows = store.query::<R>(&Query::new(filter))?;

    let mut existing: HashMap<String, R> = HashMap::new();
    for row in existing_rows {
        if let Some(serde_json::Value::String(key)) = row.field(key_field) {
            existing.entry(key).or_insert(row);
        }
    }

    let mut created = 0;
    let mut records: Vec<R> = Vec::with_capacity(distinct.len());
    for key in &distinct {
        let found = existing.remove(key);
        if found.is_none() {
            created += 1;
        }
        records.push(prepare(key, found));
    }

    store.upsert(&mut records)?;

    tracing::debug!(
        entity = %R::KIND,
        key_field,
        keys = distinct.len(),
        created,
        "resolved natural keys"
    );

    Ok(Resolved {
        entries: distinct.into_iter().zip(records).collect(),
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, EntityKind};
    use crate::ops::memory_store::InMemoryStore;

    #[test]
    fn test_empty_keys_write_nothing() {
        let mut store = InMemoryStore::new();
        let resolved = resolve_or_create_by_natural_key(
            &mut store,
            Filter::All,
            "name",
            Vec::<String>::new(),
            |key, existing: Option<Account>| existing.unwrap_or_else(|| Account::new(key)),
        )
        .unwrap();

        assert!(resolved.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_keys_resolve_once() {
        let mut store = InMemoryStore::new();
        let resolved = resolve_or_create_by_natural_key(
            &mut store,
            Filter::All,
            "name",
            ["Smith", "Jones", "Smith"],
            |key, existing: Option<Account>| existing.unwrap_or_else(|| Account::new(key)),
        )
        .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved.created(), 2);
        assert_eq!(store.len(EntityKind::Account), 2);
        assert!(resolved.id_of("Smith").is_some());
        assert_ne!(resolved.id_of("Smith"), resolved.id_of("Jones"));
    }

    #[test]
    fn test_existing_records_are_reused_and_prepared() {
        let mut store = InMemoryStore::new();
        let mut acme = Account::new("Acme");
        let acme_id = store.insert_one(&mut acme).unwrap();

        let resolved = resolve_or_create_by_natural_key(
            &mut store,
            Filter::All,
            "name",
            ["Acme", "acme"],
            |key, existing: Option<Account>| match existing {
                Some(a) => a.with_description("seen"),
                None => Account::new(key).with_description("new"),
            },
        )
        .unwrap();

        assert_eq!(resolved.matched(), 1);
        assert_eq!(resolved.created(), 1);
        assert_eq!(resolved.id_of("Acme"), Some(&acme_id));
        assert_eq!(store.len(EntityKind::Account), 2);

        let reloaded: Account = store.get(&acme_id).unwrap();
        assert_eq!(reloaded.description.as_deref(), Some("seen"));
    }
}
