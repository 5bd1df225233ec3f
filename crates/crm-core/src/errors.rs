use thiserror::Error;

use crate::model::EntityKind;

/// Result type alias using CrmError
pub type Result<T> = std::result::Result<T, CrmError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by a store or an operation is classified into one of
/// these kinds. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Caller supplied something the layer cannot interpret (bad filter, bad date)
    InvalidInput,
    /// A single-row lookup or an id-addressed write matched nothing
    NotFound,
    /// A single-row lookup matched more than one row
    Multiplicity,
    /// A required field is missing or malformed
    Validation,
    /// A reference does not point at an existing record, or a delete would orphan one
    Referential,

    // Integration/IO
    Persistence,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Multiplicity => "ERR_MULTIPLICITY",
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::Referential => "ERR_REFERENTIAL",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_kind: Option<EntityKind>,
    entity_id: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_kind: None,
            entity_id: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity kind context
    pub fn with_entity_kind(mut self, kind: EntityKind) -> Self {
        self.entity_kind = Some(kind);
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity kind context, if any
    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.entity_kind
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind) = self.entity_kind {
            write!(f, " (entity: {})", kind)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for record operations
///
/// Every variant originates in a store (or in the date arithmetic feeding a
/// store write) and propagates to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CrmError {
    // ===== Not-found / multiplicity =====
    /// A single-row query matched no rows
    #[error("No {kind} matches {criteria}")]
    NotFound { kind: EntityKind, criteria: String },

    /// An id-addressed write targeted a record that does not exist
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: EntityKind, id: String },

    /// A single-row query matched more than one row
    #[error("Expected one {kind} matching {criteria}, found {count}")]
    MultipleRows {
        kind: EntityKind,
        criteria: String,
        count: usize,
    },

    // ===== Validation =====
    /// A required field is missing or blank
    #[error("Required field missing on {kind}: {field}")]
    MissingRequiredField {
        kind: EntityKind,
        field: &'static str,
    },

    /// A field holds a value the store rejects
    #[error("Invalid value for {kind}.{field}: {reason}")]
    InvalidField {
        kind: EntityKind,
        field: &'static str,
        reason: String,
    },

    /// Insert was given a record that already carries an id
    #[error("Cannot insert {kind} that already has id {id}")]
    IdOnInsert { kind: EntityKind, id: String },

    /// Update or delete was given a record without an id
    #[error("{kind} has no id; update and delete require one")]
    MissingId { kind: EntityKind },

    /// The same id appears twice in one batch
    #[error("Duplicate {kind} id in batch: {id}")]
    DuplicateIdInBatch { kind: EntityKind, id: String },

    /// A picklist label is not one of the allowed values
    #[error("Unknown {picklist} value: {value}")]
    UnknownPicklistValue {
        picklist: &'static str,
        value: String,
    },

    // ===== Referential =====
    /// A reference points at a record that does not exist
    #[error("{kind}.{field} references missing record {id}")]
    InvalidReference {
        kind: EntityKind,
        field: &'static str,
        id: String,
    },

    /// Deleting the record would leave dependents pointing at nothing
    #[error("Cannot delete {kind} {id}: still referenced by {referenced_by}")]
    DeleteReferenced {
        kind: EntityKind,
        id: String,
        referenced_by: EntityKind,
    },

    // ===== Input =====
    /// A filter names a field the store cannot evaluate
    #[error("Invalid filter: {reason}")]
    InvalidFilter { reason: String },

    /// Date arithmetic left the representable range
    #[error("Invalid date: {reason}")]
    InvalidDate { reason: String },

    // ===== Generic Errors =====
    /// Backend failure not covered by a more specific variant
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl CrmError {
    /// Classify this error into the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            CrmError::NotFound { .. } | CrmError::RecordNotFound { .. } => ExErrorKind::NotFound,
            CrmError::MultipleRows { .. } => ExErrorKind::Multiplicity,
            CrmError::MissingRequiredField { .. }
            | CrmError::InvalidField { .. }
            | CrmError::IdOnInsert { .. }
            | CrmError::MissingId { .. }
            | CrmError::DuplicateIdInBatch { .. }
            | CrmError::UnknownPicklistValue { .. } => ExErrorKind::Validation,
            CrmError::InvalidReference { .. } | CrmError::DeleteReferenced { .. } => {
                ExErrorKind::Referential
            }
            CrmError::InvalidFilter { .. } | CrmError::InvalidDate { .. } => {
                ExErrorKind::InvalidInput
            }
            CrmError::Persistence { .. } => ExErrorKind::Persistence,
            CrmError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }
}

/// Conversion from CrmError to ExError
///
/// Keeps the human message and lifts the identifying fields into structured
/// context.
impl From<CrmError> for ExError {
    fn from(err: CrmError) -> Self {
        let base = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            CrmError::NotFound { kind, .. } | CrmError::MultipleRows { kind, .. } => {
                base.with_entity_kind(kind).with_op("query_one")
            }
            CrmError::RecordNotFound { kind, id }
            | CrmError::IdOnInsert { kind, id }
            | CrmError::DuplicateIdInBatch { kind, id } => {
                base.with_entity_kind(kind).with_entity_id(id)
            }
            CrmError::MissingRequiredField { kind, field }
            | CrmError::InvalidField { kind, field, .. } => {
                base.with_entity_kind(kind).with_field(field)
            }
            CrmError::MissingId { kind } => base.with_entity_kind(kind).with_field("id"),
            CrmError::UnknownPicklistValue { picklist, .. } => base.with_field(picklist),
            CrmError::InvalidReference { kind, field, id } => base
                .with_entity_kind(kind)
                .with_field(field)
                .with_entity_id(id),
            CrmError::DeleteReferenced { kind, id, .. } => base
                .with_entity_kind(kind)
                .with_entity_id(id)
                .with_op("delete"),
            CrmError::InvalidFilter { .. } => base.with_op("query"),
            CrmError::InvalidDate { .. }
            | CrmError::Persistence { .. }
            | CrmError::Serialization { .. } => base,
        }
    }
}

impl From<serde_json::Error> for CrmError {
    fn from(err: serde_json::Error) -> Self {
        CrmError::Serialization {
            message: err.to_string(),
        }
    }
}
