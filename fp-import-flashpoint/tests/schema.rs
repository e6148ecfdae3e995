mod common;

use fp_import_flashpoint::{FlashpointDb, FlashpointError};
use rusqlite::Connection;

#[test]
fn fixture_schema_is_compatible() {
    let db = common::fixture_db();
    let report = db.check_schema().unwrap();
    assert!(report.is_compatible(), "unexpected report: {report:?}");
    db.require_schema().unwrap();
}

#[test]
fn missing_table_is_reported_once() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(common::SCHEMA_SQL).unwrap();
    conn.execute_batch("DROP TABLE playlist_game;").unwrap();
    let db = FlashpointDb::from_connection(conn);

    let report = db.check_schema().unwrap();
    assert_eq!(
        report.missing_tables.iter().collect::<Vec<_>>(),
        vec!["playlist_game"]
    );
    assert!(report.missing_columns.is_empty());
}

#[test]
fn missing_columns_are_table_qualified() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(common::SCHEMA_SQL).unwrap();
    conn.execute_batch(
        "DROP TABLE playlist;
         CREATE TABLE playlist (id TEXT PRIMARY KEY, title TEXT);",
    )
    .unwrap();
    let db = FlashpointDb::from_connection(conn);

    let report = db.check_schema().unwrap();
    assert!(report.missing_tables.is_empty());
    assert!(report.missing_columns.contains("playlist: description"));
    assert!(report.missing_columns.contains("playlist: author"));
    assert_eq!(report.missing_columns.len(), 2);
}

#[test]
fn require_schema_turns_report_into_error() {
    let db = FlashpointDb::from_connection(Connection::open_in_memory().unwrap());
    match db.require_schema() {
        Err(FlashpointError::SchemaMismatch {
            missing_tables,
            missing_columns,
        }) => {
            assert_eq!(missing_tables.len(), 4);
            assert!(missing_columns.is_empty());
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}
