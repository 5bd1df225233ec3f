//! Migration checksums
//!
//! `schema_version` records the SHA-256 of each migration's SQL when it is
//! applied. A later run that embeds different SQL under the same id is refused.

use sha2::{Digest, Sha256};

use crate::errors::{checksum_mismatch, Result};

/// Hex-encoded SHA-256 of a migration's SQL text
pub fn compute_checksum(sql: &str) -> String {
    hex::encode(Sha256::digest(sql.as_bytes()))
}

/// Check embedded SQL against the checksum recorded when it was applied
///
/// # Errors
///
/// Returns a persistence error naming the migration if the checksums differ.
pub fn verify_checksum(migration_id: &str, recorded: &str, sql: &str) -> Result<()> {
    let actual = compute_checksum(sql);
    if actual == recorded {
        Ok(())
    } else {
        Err(checksum_mismatch(migration_id, recorded, &actual))
    }
}
