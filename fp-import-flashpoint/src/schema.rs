//! Structural check of the Flashpoint database.
//!
//! The importer only reads a handful of tables. Before any query runs, the
//! tables and columns it depends on are enumerated and compared against what
//! the database actually contains, so an incompatible Flashpoint version is
//! reported up front instead of failing halfway through an import.

use std::collections::BTreeSet;

use rusqlite::Connection;

use crate::error::FlashpointError;

/// A table and the columns the importer reads from it.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const GAME_TABLE: TableSpec = TableSpec {
    name: "game",
    columns: &[
        "id",
        "title",
        "series",
        "developer",
        "publisher",
        "dateAdded",
        "dateModified",
        "platform",
        "broken",
        "extreme",
        "playMode",
        "status",
        "notes",
        "source",
        "applicationPath",
        "launchCommand",
        "releaseDate",
        "version",
        "originalDescription",
        "language",
        "library",
        "orderTitle",
    ],
};

pub const ADDITIONAL_APP_TABLE: TableSpec = TableSpec {
    name: "additional_app",
    columns: &[
        "id",
        "applicationPath",
        "autoRunBefore",
        "launchCommand",
        "name",
        "waitForExit",
        "parentGameId",
    ],
};

pub const PLAYLIST_TABLE: TableSpec = TableSpec {
    name: "playlist",
    columns: &["id", "title", "description", "author"],
};

pub const PLAYLIST_GAME_TABLE: TableSpec = TableSpec {
    name: "playlist_game",
    columns: &["id", "playlistId", "order", "gameId"],
};

/// Every table the importer depends on.
pub const REQUIRED_TABLES: &[TableSpec] = &[
    GAME_TABLE,
    ADDITIONAL_APP_TABLE,
    PLAYLIST_TABLE,
    PLAYLIST_GAME_TABLE,
];

/// Outcome of comparing the database against [`REQUIRED_TABLES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// Required tables that do not exist.
    pub missing_tables: BTreeSet<String>,
    /// Required columns that do not exist, as `table: column`.
    pub missing_columns: BTreeSet<String>,
}

impl SchemaReport {
    pub fn is_compatible(&self) -> bool {
        self.missing_tables.is_empty() && self.missing_columns.is_empty()
    }

    /// Convert an incompatible report into an error.
    pub fn into_result(self) -> Result<(), FlashpointError> {
        if self.is_compatible() {
            Ok(())
        } else {
            Err(FlashpointError::SchemaMismatch {
                missing_tables: self.missing_tables.into_iter().collect(),
                missing_columns: self.missing_columns.into_iter().collect(),
            })
        }
    }
}

/// Compare the database against `specs`.
///
/// Columns are only checked for tables that exist; a missing table is
/// reported once in `missing_tables` rather than once per column.
pub fn check_tables(conn: &Connection, specs: &[TableSpec]) -> Result<SchemaReport, FlashpointError> {
    let existing_tables = table_names(conn)?;
    let mut report = SchemaReport::default();

    for spec in specs {
        if !existing_tables.contains(spec.name) {
            report.missing_tables.insert(spec.name.to_string());
            continue;
        }

        let existing_columns = column_names(conn, spec.name)?;
        for column in spec.columns {
            if !existing_columns.contains(*column) {
                report
                    .missing_columns
                    .insert(format!("{}: {}", spec.name, column));
            }
        }
    }

    Ok(report)
}

fn table_names(conn: &Connection) -> Result<BTreeSet<String>, FlashpointError> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<BTreeSet<_>, _>>().map_err(Into::into)
}

fn column_names(conn: &Connection, table: &str) -> Result<BTreeSet<String>, FlashpointError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<BTreeSet<_>, _>>().map_err(Into::into)
}
