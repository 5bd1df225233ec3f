//! SQLite record store
//!
//! One table per entity kind. Every write call runs in its own transaction,
//! so a batch is stored completely or not at all.

mod filter_sql;

pub use filter_sql::{compile, WhereClause};

use std::collections::HashSet;
use std::path::Path;

use crm_core::errors::{CrmError, Result};
use crm_core::ops::store::{
    check_delete_batch, check_insert_batch, check_update_batch, check_upsert_batch,
};
use crm_core::{EntityKind, Query, Record, RecordId, RecordStore};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::db;
use crate::errors::from_rusqlite;
use crate::migrations::apply_migrations;

/// `RecordStore` backed by a SQLite database
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and bring its schema up to date
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the file cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    /// Fresh in-memory database (for testing)
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection, configuring it and applying migrations
    ///
    /// # Errors
    ///
    /// Returns a persistence error if configuration or migration fails.
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn.transaction().map_err(from_rusqlite)
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn check_references<R: Record>(tx: &Transaction<'_>, records: &[R]) -> Result<()> {
    for record in records {
        if let Some(account_id) = record.account_id() {
            if !row_exists(tx, EntityKind::Account, account_id)? {
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

fn row_exists(tx: &Transaction<'_>, kind: EntityKind, id: &RecordId) -> Result<bool> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", kind.table());
    let mut stmt = tx.prepare_cached(&sql).map_err(from_rusqlite)?;
    stmt.exists([id.as_str()]).map_err(from_rusqlite)
}

fn insert_row<R: Record>(tx: &Transaction<'_>, record: &R) -> Result<RecordId> {
    let id = RecordId::generate(R::KIND.key_prefix());
    let mut assigned = record.clone();
    assigned.set_id(id.clone());
    let body = assigned.to_json()?.to_string();
    let ts = now();

    let sql = format!(
        "INSERT INTO {} (id, account_id, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
        R::KIND.table()
    );
    let mut stmt = tx.prepare_cached(&sql).map_err(from_rusqlite)?;
    stmt.execute(params![
        id.as_str(),
        assigned.account_id().map(RecordId::as_str),
        body,
        ts
    ])
    .map_err(from_rusqlite)?;

    Ok(id)
}

fn update_row<R: Record>(tx: &Transaction<'_>, id: &RecordId, record: &R) -> Result<()> {
    let body = record.to_json()?.to_string();
    let sql = format!(
        "UPDATE {} SET account_id = ?1, body = ?2, updated_at = ?3 WHERE id = ?4",
        R::KIND.table()
    );
    let changed = tx
        .execute(
            &sql,
            params![
                record.account_id().map(RecordId::as_str),
                body,
                now(),
                id.as_str()
            ],
        )
        .map_err(from_rusqlite)?;

    if changed == 0 {
        return Err(CrmError::RecordNotFound {
            kind: R::KIND,
            id: id.to_string(),
        });
    }
    Ok(())
}

impl RecordStore for SqliteStore {
    fn query<R: Record>(&self, query: &Query) -> Result<Vec<R>> {
        let clause = compile(&query.filter)?;
        let mut sql = format!(
            "SELECT body FROM {} WHERE {} ORDER BY seq",
            R::KIND.table(),
            clause.sql
        );
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = self.conn.prepare(&sql).map_err(from_rusqlite)?;
        let bodies = stmt
            .query_map(rusqlite::params_from_iter(clause.params.iter()), |row| {
                row.get::<_, String>(0)
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;

        bodies
            .into_iter()
            .map(|body| R::from_json(serde_json::from_str(&body)?))
            .collect()
    }

    fn insert<R: Record>(&mut self, records: &mut [R]) -> Result<Vec<RecordId>> {
        check_insert_batch(records)?;

        let tx = self.transaction()?;
        check_references(&tx, records)?;
        let ids = records
            .iter()
            .map(|record| insert_row(&tx, record))
            .collect::<Result<Vec<_>>>()?;
        tx.commit().map_err(from_rusqlite)?;

        for (record, id) in records.iter_mut().zip(&ids) {
            record.set_id(id.clone());
        }

        tracing::debug!(entity = %R::KIND, count = ids.len(), "sqlite insert");
        Ok(ids)
    }

    fn update<R: Record>(&mut self, records: &[R]) -> Result<()> {
        check_update_batch(records)?;

        let tx = self.transaction()?;
        check_references(&tx, records)?;
        for record in records {
            let id = record.id().ok_or(CrmError::MissingId { kind: R::KIND })?;
            update_row(&tx, id, record)?;
        }
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(entity = %R::KIND, count = records.len(), "sqlite update");
        Ok(())
    }

    fn upsert<R: Record>(&mut self, records: &mut [R]) -> Result<Vec<RecordId>> {
        check_upsert_batch(records)?;

        let tx = self.transaction()?;
        check_references(&tx, records)?;
        let mut ids = Vec::with_capacity(records.len());
        let mut created = 0;
        for record in records.iter() {
            match record.id() {
                Some(id) => {
                    update_row(&tx, id, record)?;
                    ids.push(id.clone());
                }
                None => {
                    ids.push(insert_row(&tx, record)?);
                    created += 1;
                }
            }
        }
        tx.commit().map_err(from_rusqlite)?;

        for (record, id) in records.iter_mut().zip(&ids) {
            if record.id().is_none() {
                record.set_id(id.clone());
            }
        }

        tracing::debug!(
            entity = %R::KIND,
            count = ids.len(),
            created,
            "sqlite upsert"
        );
        Ok(ids)
    }

    fn delete<R: Record>(&mut self, records: &[R]) -> Result<()> {
        check_delete_batch(records)?;
        let ids: HashSet<&RecordId> = records.iter().filter_map(|r| r.id()).collect();

        let tx = self.transaction()?;
        for id in &ids {
            if !row_exists(&tx, R::KIND, id)? {
                return Err(CrmError::RecordNotFound {
                    kind: R::KIND,
                    id: id.to_string(),
                });
            }
        }

        if R::KIND == EntityKind::Account {
            for kind in EntityKind::ALL.iter().filter(|k| **k != EntityKind::Account) {
                let sql = format!("SELECT 1 FROM {} WHERE account_id = ?1 LIMIT 1", kind.table());
                for id in &ids {
                    let referenced = tx
                        .query_row(&sql, [id.as_str()], |_| Ok(()))
                        .optional()
                        .map_err(from_rusqlite)?;
                    if referenced.is_some() {
                        return Err(CrmError::DeleteReferenced {
                            kind: R::KIND,
                            id: id.to_string(),
                            referenced_by: *kind,
                        });
                    }
                }
            }
        }

        let sql = format!("DELETE FROM {} WHERE id = ?1", R::KIND.table());
        for id in &ids {
            tx.execute(&sql, [id.as_str()]).map_err(from_rusqlite)?;
        }
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(entity = %R::KIND, count = ids.len(), "sqlite delete");
        Ok(())
    }
}
