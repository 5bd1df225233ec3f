// Integration tests for the migration framework

use crm_core::errors::CrmError;
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();

    let result = crm_store::migrations::apply_migrations(&mut conn);
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    let tables = get_table_names(&conn);
    let expected_tables = vec![
        "accounts",
        "cases",
        "contacts",
        "leads",
        "opportunities",
        "schema_version",
        "sqlite_sequence", // Auto-created by SQLite for AUTOINCREMENT columns
    ];
    assert_eq!(tables, expected_tables);
}

#[test]
fn test_migration_idempotency() {
    let mut conn = setup_test_db();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();

    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count, 1, "Should have exactly 1 migration applied");
}

#[test]
fn test_checksum_recorded() {
    let mut conn = setup_test_db();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();

    let checksum: String = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = '001_initial_schema'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(checksum.len(), 64);
}

#[test]
fn test_checksum_mismatch_detected() {
    let mut conn = setup_test_db();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();

    conn.execute(
        "UPDATE schema_version SET checksum = 'tampered' WHERE migration_id = '001_initial_schema'",
        [],
    )
    .unwrap();

    let result = crm_store::migrations::apply_migrations(&mut conn);
    match result {
        Err(CrmError::Persistence { message }) => {
            assert!(message.contains("Checksum mismatch"), "got: {}", message)
        }
        other => panic!("Expected checksum mismatch, got {:?}", other),
    }
}
