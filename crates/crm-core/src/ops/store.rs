use std::collections::HashSet;

use crm_core_types::RecordId;

use super::filter::{Filter, Query};
use crate::errors::{CrmError, Result};
use crate::model::Record;

/// Persistence collaborator for record operations
///
/// The five methods are the only way operations touch data. Each write call
/// is atomic for its own batch: either every record is written or none is.
/// Nothing spans calls; the last write wins.
pub trait RecordStore {
    /// Records of kind `R` matching the query, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilter` if the filter cannot be evaluated, or a backend error.
    fn query<R: Record>(&self, query: &Query) -> Result<Vec<R>>;

    /// Insert new records, assigning their ids
    ///
    /// # Errors
    ///
    /// Returns a validation error if any record fails `validate` or already
    /// has an id, and `InvalidReference` if an account reference is dangling.
    fn insert<R: Record>(&mut self, records: &mut [R]) -> Result<Vec<RecordId>>;

    /// Overwrite existing records, addressed by id
    ///
    /// # Errors
    ///
    /// Returns `MissingId`, `RecordNotFound`, a validation error, or `InvalidReference`.
    fn update<R: Record>(&mut self, records: &[R]) -> Result<()>;

    /// Update records that carry an id, insert the rest
    ///
    /// Returns the ids of all records in input order.
    ///
    /// # Errors
    ///
    /// Same as `insert` and `update` for the respective records.
    fn upsert<R: Record>(&mut self, records: &mut [R]) -> Result<Vec<RecordId>>;

    /// Delete existing records, addressed by id
    ///
    /// # Errors
    ///
    /// Returns `MissingId`, `RecordNotFound`, or `DeleteReferenced` when
    /// another record still points at one being deleted.
    fn delete<R: Record>(&mut self, records: &[R]) -> Result<()>;

    /// The single record matching the query
    ///
    /// Any limit on `query` is ignored so the match count is exact.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` on zero matches and `MultipleRows` on more than one.
    fn query_one<R: Record>(&self, query: &Query) -> Result<R> {
        let mut rows = self.query::<R>(&Query::new(query.filter.clone()))?;
        match rows.len() {
            0 => Err(CrmError::NotFound {
                kind: R::KIND,
                criteria: query.filter.to_string(),
            }),
            1 => Ok(rows.remove(0)),
            count => Err(CrmError::MultipleRows {
                kind: R::KIND,
                criteria: query.filter.to_string(),
                count,
            }),
        }
    }

    /// Fetch one record by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    fn get<R: Record>(&self, id: &RecordId) -> Result<R> {
        self.query_one(&Query::by_id(id))
    }

    /// Insert a single record
    ///
    /// # Errors
    ///
    /// Same as `insert`.
    fn insert_one<R: Record>(&mut self, record: &mut R) -> Result<RecordId> {
        let mut ids = self.insert(std::slice::from_mut(record))?;
        ids.pop().ok_or_else(|| CrmError::Persistence {
            message: "insert returned no id".to_string(),
        })
    }

    /// Number of records of kind `R` matching the filter
    ///
    /// # Errors
    ///
    /// Same as `query`.
    fn count<R: Record>(&self, filter: &Filter) -> Result<usize> {
        Ok(self.query::<R>(&Query::new(filter.clone()))?.len())
    }
}

/// Pre-write checks for an insert batch
///
/// # Errors
///
/// Returns `IdOnInsert` or the record's own validation error.
pub fn check_insert_batch<R: Record>(records: &[R]) -> Result<()> {
    for record in records {
        if let Some(id) = record.id() {
            return Err(CrmError::IdOnInsert {
                kind: R::KIND,
                id: id.to_string(),
            });
        }
        record.validate()?;
    }
    Ok(())
}

/// Pre-write checks for an update batch
///
/// # Errors
///
/// Returns `MissingId`, `DuplicateIdInBatch`, or the record's own validation error.
pub fn check_update_batch<R: Record>(records: &[R]) -> Result<()> {
    check_ids_present_and_unique(records)?;
    for record in records {
        record.validate()?;
    }
    Ok(())
}

/// Pre-write checks for an upsert batch
///
/// # Errors
///
/// Returns `DuplicateIdInBatch` or the record's own validation error.
pub fn check_upsert_batch<R: Record>(records: &[R]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if let Some(id) = record.id() {
            if !seen.insert(id) {
                return Err(CrmError::DuplicateIdInBatch {
                    kind: R::KIND,
                    id: id.to_string(),
                });
            }
        }
        record.validate()?;
    }
    Ok(())
}

/// Pre-write checks for a delete batch
///
/// # Errors
///
/// Returns `MissingId` or `DuplicateIdInBatch`.
pub fn check_delete_batch<R: Record>(records: &[R]) -> Result<()> {
    check_ids_present_and_unique(records)
}

fn check_ids_present_and_unique<R: Record>(records: &[R]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        let id = record.id().ok_or(CrmError::MissingId { kind: R::KIND })?;
        if !seen.insert(id) {
            return Err(CrmError::DuplicateIdInBatch {
                kind: R::KIND,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, EntityKind};

    fn saved(name: &str, id: &str) -> Account {
        let mut account = Account::new(name);
        account.id = Some(RecordId::from(id));
        account
    }

    #[test]
    fn test_insert_batch_rejects_existing_id() {
        let result = check_insert_batch(&[Account::new("A"), saved("B", "001b")]);
        assert!(matches!(
            result,
            Err(CrmError::IdOnInsert {
                kind: EntityKind::Account,
                ..
            })
        ));
    }

    #[test]
    fn test_update_batch_requires_ids() {
        let result = check_update_batch(&[Account::new("A")]);
        assert!(matches!(result, Err(CrmError::MissingId { .. })));
    }

    #[test]
    fn test_update_batch_rejects_duplicate_ids() {
        let result = check_update_batch(&[saved("A", "001a"), saved("A2", "001a")]);
        assert!(matches!(result, Err(CrmError::DuplicateIdInBatch { .. })));
    }

    #[test]
    fn test_upsert_batch_allows_mixed() {
        assert!(check_upsert_batch(&[Account::new("A"), saved("B", "001b")]).is_ok());
        assert!(check_upsert_batch(&[Account::new("")]).is_err());
    }
}
