use std::collections::{BTreeMap, HashMap, HashSet};

use crm_core_types::RecordId;
use serde_json::Value;

use super::filter::Query;
use super::store::{
    check_delete_batch, check_insert_batch, check_update_batch, check_upsert_batch, RecordStore,
};
use crate::errors::{CrmError, Result};
use crate::model::{EntityKind, Record};

/// In-memory record store
///
/// HashMap-backed tables of serialized rows, one per entity kind. Not
/// thread-safe (no Arc/RwLock) - designed for single-threaded use and as the
/// fake collaborator in tests. Enforces the same validation, id and
/// reference rules as the SQLite store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: HashMap<EntityKind, Table>,
    next_seq: u64,
}

#[derive(Debug, Clone, Default)]
struct Table {
    /// Rows keyed by insertion sequence
    rows: BTreeMap<u64, StoredRow>,
    /// Record id to insertion sequence
    index: HashMap<RecordId, u64>,
}

#[derive(Debug, Clone)]
struct StoredRow {
    account_id: Option<RecordId>,
    body: Value,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records of a kind
    pub fn len(&self, kind: EntityKind) -> usize {
        self.tables.get(&kind).map_or(0, |t| t.rows.len())
    }

    /// True if no records of any kind are stored
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(|t| t.rows.is_empty())
    }

    /// Check if a record id exists in the table of `kind`
    pub fn contains(&self, kind: EntityKind, id: &RecordId) -> bool {
        self.tables
            .get(&kind)
            .is_some_and(|t| t.index.contains_key(id))
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut Table {
        self.tables.entry(kind).or_default()
    }

    fn check_references<R: Record>(&self, records: &[R]) -> Result<()> {
        for record in records {
            if let Some(account_id) = record.account_id() {
                if !self.contains(EntityKind::Account, account_id) {
                    return Err(CrmError::InvalidReference {
                        kind: R::KIND,
                        field: "account_id",
                        id: account_id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_exists<R: Record>(&self, id: &RecordId) -> Result<()> {
        if self.contains(R::KIND, id) {
            Ok(())
        } else {
            Err(CrmError::RecordNotFound {
                kind: R::KIND,
                id: id.to_string(),
            })
        }
    }

    fn stage_row<R: Record>(record: &R) -> Result<StoredRow> {
        Ok(StoredRow {
            account_id: record.account_id().cloned(),
            body: record.to_json()?,
        })
    }

    /// Stage every record of an upsert-style batch before touching a table
    ///
    /// Returns one entry per input record: the id it will be stored under,
    /// whether it is new, and the row itself.
    fn stage_batch<R: Record>(&self, records: &[R]) -> Result<Vec<(RecordId, bool, StoredRow)>> {
        self.check_references(records)?;

        let mut staged = Vec::with_capacity(records.len());
        for record in records {
            match record.id() {
                Some(id) => {
                    self.check_exists::<R>(id)?;
                    staged.push((id.clone(), false, Self::stage_row(record)?));
                }
                None => {
                    let id = RecordId::generate(R::KIND.key_prefix());
                    let mut assigned = record.clone();
                    assigned.set_id(id.clone());
                    staged.push((id, true, Self::stage_row(&assigned)?));
                }
            }
        }
        Ok(staged)
    }

    fn commit_batch(&mut self, kind: EntityKind, staged: Vec<(RecordId, bool, StoredRow)>) {
        for (id, is_new, row) in staged {
            let seq = if is_new {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            } else {
                match self.tables.get(&kind).and_then(|t| t.index.get(&id)) {
                    Some(seq) => *seq,
                    None => continue,
                }
            };

            let table = self.table_mut(kind);
            table.index.insert(id, seq);
            table.rows.insert(seq, row);
        }
    }
}

impl RecordStore for InMemoryStore {
    fn query<R: Record>(&self, query: &Query) -> Result<Vec<R>> {
        let Some(table) = self.tables.get(&R::KIND) else {
            return Ok(Vec::new());
        };

        let limit = query.limit.unwrap_or(usize::MAX);
        table
            .rows
            .values()
            .filter(|row| query.filter.matches(&row.body))
            .take(limit)
            .map(|row| R::from_json(row.body.clone()))
            .collect()
    }

    fn insert<R: Record>(&mut self, records: &mut [R]) -> Result<Vec<RecordId>> {
        check_insert_batch(records)?;
        let staged = self.stage_batch(records)?;

        let ids: Vec<RecordId> = staged.iter().map(|(id, _, _)| id.clone()).collect();
        self.commit_batch(R::KIND, staged);
        for (record, id) in records.iter_mut().zip(&ids) {
            record.set_id(id.clone());
        }

        tracing::debug!(entity = %R::KIND, count = ids.len(), "in-memory insert");
        Ok(ids)
    }

    fn update<R: Record>(&mut self, records: &[R]) -> Result<()> {
        check_update_batch(records)?;
        let staged = self.stage_batch(records)?;

        let count = staged.len();
        self.commit_batch(R::KIND, staged);

        tracing::debug!(entity = %R::KIND, count, "in-memory update");
        Ok(())
    }

    fn upsert<R: Record>(&mut self, records: &mut [R]) -> Result<Vec<RecordId>> {
        check_upsert_batch(records)?;
        let staged = self.stage_batch(records)?;

        let ids: Vec<RecordId> = staged.iter().map(|(id, _, _)| id.clone()).collect();
        let created = staged.iter().filter(|(_, is_new, _)| *is_new).count();
        self.commit_batch(R::KIND, staged);
        for (record, id) in records.iter_mut().zip(&ids) {
            if record.id().is_none() {
                record.set_id(id.clone());
            }
        }

        tracing::debug!(
            entity = %R::KIND,
            count = ids.len(),
            created,
            "in-memory upsert"
        );
        Ok(ids)
    }

    fn delete<R: Record>(&mut self, records: &[R]) -> Result<()> {
        check_delete_batch(records)?;

        let ids: HashSet<&RecordId> = records.iter().filter_map(|r| r.id()).collect();
        for id in &ids {
            self.check_exists::<R>(id)?;
        }

        if R::KIND == EntityKind::Account {
            for (kind, table) in &self.tables {
                let referenced = table.rows.values().find_map(|row| {
                    row.account_id
                        .as_ref()
                        .filter(|account_id| ids.contains(account_id))
                });
                if let Some(account_id) = referenced {
                    return Err(CrmError::DeleteReferenced {
                        kind: R::KIND,
                        id: account_id.to_string(),
                        referenced_by: *kind,
                    });
                }
            }
        }

        let table = self.table_mut(R::KIND);
        for id in &ids {
            if let Some(seq) = table.index.remove(*id) {
                table.rows.remove(&seq);
            }
        }

        tracing::debug!(entity = %R::KIND, count = ids.len(), "in-memory delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, Contact};
    use crate::ops::filter::Filter;

    #[test]
    fn test_new_store() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(EntityKind::Account), 0);
    }

    #[test]
    fn test_insert_assigns_prefixed_ids() {
        let mut store = InMemoryStore::new();
        let mut accounts = vec![Account::new("A"), Account::new("B")];

        let ids = store.insert(&mut accounts).unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|id| id.key_prefix() == "001"));
        assert_eq!(accounts[0].id.as_ref(), Some(&ids[0]));
        assert_eq!(store.len(EntityKind::Account), 2);
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let mut store = InMemoryStore::new();
        let mut accounts: Vec<Account> = ["C", "A", "B"].into_iter().map(Account::new).collect();
        store.insert(&mut accounts).unwrap();

        let names: Vec<String> = store
            .query::<Account>(&Query::all())
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);

        let limited = store.query::<Account>(&Query::all().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_insert_batch_is_all_or_nothing() {
        let mut store = InMemoryStore::new();
        let mut accounts = vec![Account::new("Good"), Account::new("")];

        let result = store.insert(&mut accounts);

        assert!(matches!(result, Err(CrmError::MissingRequiredField { .. })));
        assert!(store.is_empty());
        assert!(accounts[0].id.is_none());
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = InMemoryStore::new();
        let mut accounts = vec![Account::new("A"), Account::new("B")];
        store.insert(&mut accounts).unwrap();

        accounts[0].industry = Some("Energy".to_string());
        store.update(&accounts[..1]).unwrap();

        let all = store.query::<Account>(&Query::all()).unwrap();
        assert_eq!(all[0].name, "A");
        assert_eq!(all[0].industry.as_deref(), Some("Energy"));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut store = InMemoryStore::new();
        let mut account = Account::new("Ghost");
        account.id = Some(RecordId::from("001ghost"));

        let result = store.update(&[account]);
        assert!(matches!(result, Err(CrmError::RecordNotFound { .. })));
    }

    #[test]
    fn test_dangling_account_reference_is_rejected() {
        let mut store = InMemoryStore::new();
        let mut contact = Contact::new("Smith").with_account(RecordId::from("001missing"));

        let result = store.insert_one(&mut contact);
        assert!(matches!(result, Err(CrmError::InvalidReference { .. })));
        assert_eq!(store.len(EntityKind::Contact), 0);
    }

    #[test]
    fn test_delete_referenced_account_is_rejected() {
        let mut store = InMemoryStore::new();
        let mut account = Account::new("Acme");
        let account_id = store.insert_one(&mut account).unwrap();
        let mut contact = Contact::new("Smith").with_account(account_id);
        store.insert_one(&mut contact).unwrap();

        let result = store.delete(&[account.clone()]);
        assert!(matches!(
            result,
            Err(CrmError::DeleteReferenced {
                referenced_by: EntityKind::Contact,
                ..
            })
        ));

        store.delete(&[contact]).unwrap();
        store.delete(&[account]).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_query_one_multiplicity() {
        let mut store = InMemoryStore::new();
        let mut accounts = vec![Account::new("Twin"), Account::new("Twin")];
        store.insert(&mut accounts).unwrap();

        let result = store.query_one::<Account>(&Query::new(Filter::eq("name", "Twin")));
        assert!(matches!(result, Err(CrmError::MultipleRows { count: 2, .. })));

        let result = store.query_one::<Account>(&Query::new(Filter::eq("name", "Nobody")));
        assert!(matches!(result, Err(CrmError::NotFound { .. })));
    }
}
