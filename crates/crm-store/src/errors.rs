//! Error handling for crm-store
//!
//! Store failures surface as `CrmError` so callers see one taxonomy whatever
//! the backend. Helpers here build the store-specific variants.

use crm_core::errors::CrmError;

pub use crm_core::errors::Result;

/// SQLite extended result code for a failed foreign key constraint
const SQLITE_CONSTRAINT_FOREIGNKEY: std::os::raw::c_int = 787;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> CrmError {
    CrmError::Persistence {
        message: format!("Migration {} failed: {}", migration_id, reason),
    }
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> CrmError {
    CrmError::Persistence {
        message: format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    }
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> CrmError {
    let message = match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == SQLITE_CONSTRAINT_FOREIGNKEY => {
            format!("foreign key constraint failed: {}", err)
        }
        _ => err.to_string(),
    };
    CrmError::Persistence { message }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> CrmError {
    CrmError::Persistence {
        message: format!("{}: {}", operation, err),
    }
}
