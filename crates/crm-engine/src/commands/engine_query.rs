//! Engine-level read-only query surface.
//!
//! `apply_engine_query` takes a shared store reference and never writes.
//! Records come back in their serialized form so callers can print any kind
//! without knowing its type.

use crm_core::errors::Result;
use crm_core::model::{Account, Case, Contact, EntityKind, Lead, Opportunity, Record};
use crm_core::{log_op_end, log_op_error, log_op_start, Filter, Query, RecordId, RecordStore};
use serde_json::Value;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineQuery {
    /// Records of one kind matching a filter, in insertion order
    List {
        kind: EntityKind,
        filter: Filter,
        limit: Option<usize>,
    },
    /// Exactly one record by id
    Get { kind: EntityKind, id: RecordId },
}

impl EngineQuery {
    /// Every record of a kind
    pub fn list_all(kind: EntityKind) -> Self {
        EngineQuery::List {
            kind,
            filter: Filter::All,
            limit: None,
        }
    }

    fn op_name(&self) -> &'static str {
        match self {
            EngineQuery::List { .. } => "record_list",
            EngineQuery::Get { .. } => "record_get",
        }
    }
}

/// Result of an engine query.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineQueryResult {
    Records(Vec<Value>),
    Record(Value),
}

fn list_as_json<R: Record, S: RecordStore>(store: &S, query: &Query) -> Result<Vec<Value>> {
    store
        .query::<R>(query)?
        .iter()
        .map(Record::to_json)
        .collect()
}

fn list_kind<S: RecordStore>(store: &S, kind: EntityKind, query: &Query) -> Result<Vec<Value>> {
    match kind {
        EntityKind::Account => list_as_json::<Account, _>(store, query),
        EntityKind::Contact => list_as_json::<Contact, _>(store, query),
        EntityKind::Opportunity => list_as_json::<Opportunity, _>(store, query),
        EntityKind::Lead => list_as_json::<Lead, _>(store, query),
        EntityKind::Case => list_as_json::<Case, _>(store, query),
    }
}

/// Apply a read-only engine query.
///
/// # Errors
///
/// `Get` fails with `NotFound` when no record has the id. Filter errors and
/// backend failures propagate from the store.
pub fn apply_engine_query<S: RecordStore>(
    query: EngineQuery,
    store: &S,
) -> Result<EngineQueryResult> {
    let op = query.op_name();
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = match query {
        EngineQuery::List {
            kind,
            filter,
            limit,
        } => {
            let query = Query { filter, limit };
            list_kind(store, kind, &query).map(EngineQueryResult::Records)
        }
        EngineQuery::Get { kind, id } => {
            let query = Query::by_id(&id);
            match kind {
                EntityKind::Account => store.query_one::<Account>(&query).and_then(|r| r.to_json()),
                EntityKind::Contact => store.query_one::<Contact>(&query).and_then(|r| r.to_json()),
                EntityKind::Opportunity => {
                    store.query_one::<Opportunity>(&query).and_then(|r| r.to_json())
                }
                EntityKind::Lead => store.query_one::<Lead>(&query).and_then(|r| r.to_json()),
                EntityKind::Case => store.query_one::<Case>(&query).and_then(|r| r.to_json()),
            }
            .map(EngineQueryResult::Record)
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!(op, duration_ms = elapsed),
        Err(e) => log_op_error!(op, e.clone(), duration_ms = elapsed),
    }
    result
}
