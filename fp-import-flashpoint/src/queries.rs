//! Read-only queries against the Flashpoint database.
//!
//! Every query materializes its full result before returning so the caller
//! knows the row count up front (progress totals are computed from it).
//! Errors from SQLite are passed through unchanged; nothing here retries.

use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::types::Type;
use rusqlite::{Connection, OpenFlags, Row, params, params_from_iter};
use uuid::Uuid;

use crate::error::FlashpointError;
use crate::schema::{self, SchemaReport};
use crate::types::*;

/// An ordered, fully-counted query result.
#[derive(Debug, Clone)]
pub struct QueryBuffer<T> {
    /// What the rows were selected by (platform name, playlist title, table).
    pub source: String,
    rows: Vec<T>,
}

impl<T> QueryBuffer<T> {
    pub fn new(source: impl Into<String>, rows: Vec<T>) -> Self {
        Self {
            source: source.into(),
            rows,
        }
    }

    /// Total number of rows in the result.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }
}

impl<T> IntoIterator for QueryBuffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a QueryBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Read-only access to a Flashpoint database.
///
/// The connection is owned by this value; there is no process-wide registry.
pub struct FlashpointDb {
    conn: Connection,
}

impl FlashpointDb {
    /// Open the database at `path` in read-only mode.
    pub fn open(path: &Path) -> Result<Self, FlashpointError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("Opened Flashpoint database {}", path.display());
        Ok(Self { conn })
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Compare the database against the tables and columns the importer reads.
    pub fn check_schema(&self) -> Result<SchemaReport, FlashpointError> {
        schema::check_tables(&self.conn, schema::REQUIRED_TABLES)
    }

    /// Like [`check_schema`](Self::check_schema), but an incompatible schema is an error.
    pub fn require_schema(&self) -> Result<(), FlashpointError> {
        self.check_schema()?.into_result()
    }

    /// Distinct platform names, sorted.
    pub fn platform_list(&self) -> Result<Vec<String>, FlashpointError> {
        self.list_distinct(schema::GAME_TABLE.name, "platform")
    }

    /// Distinct playlist titles, sorted.
    pub fn playlist_list(&self) -> Result<Vec<String>, FlashpointError> {
        self.list_distinct(schema::PLAYLIST_TABLE.name, "title")
    }

    // `table` and `column` only ever come from the schema constants.
    fn list_distinct(&self, table: &str, column: &str) -> Result<Vec<String>, FlashpointError> {
        let sql = format!(
            "SELECT DISTINCT \"{column}\" FROM \"{table}\" WHERE \"{column}\" IS NOT NULL ORDER BY \"{column}\""
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut values = rows.collect::<Result<Vec<_>, _>>()?;
        values.sort();
        Ok(values)
    }

    /// All games of each requested platform, one buffer per platform in the
    /// order given.
    ///
    /// `library` restricts the result to one game library (normally
    /// [`GAME_LIBRARY`]); `None` returns every library.
    pub fn query_games(
        &self,
        platforms: &[String],
        library: Option<&str>,
    ) -> Result<Vec<QueryBuffer<FpGame>>, FlashpointError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, series, developer, publisher, dateAdded, dateModified,
                    platform, broken, extreme, playMode, status, notes, source,
                    applicationPath, launchCommand, releaseDate, version,
                    originalDescription, language, library, orderTitle
             FROM game
             WHERE platform = ?1 AND (?2 IS NULL OR library = ?2)
             ORDER BY title, id",
        )?;

        let mut buffers = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let rows = stmt.query_map(params![platform, library], row_to_game)?;
            let rows = rows.collect::<Result<Vec<_>, _>>()?;
            log::debug!("Queried {} games for platform '{}'", rows.len(), platform);
            buffers.push(QueryBuffer::new(platform.clone(), rows));
        }
        Ok(buffers)
    }

    /// All additional applications.
    ///
    /// With `exclude_extras`, entries that only open an extras folder are left
    /// out since they have no LaunchBox equivalent.
    pub fn query_additional_apps(
        &self,
        exclude_extras: bool,
    ) -> Result<QueryBuffer<FpAddApp>, FlashpointError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, applicationPath, autoRunBefore, launchCommand, name,
                    waitForExit, parentGameId
             FROM additional_app
             WHERE ?1 = 0 OR applicationPath != ?2
             ORDER BY parentGameId, name, id",
        )?;
        let rows = stmt.query_map(params![exclude_extras, ADD_APP_EXTRAS], row_to_add_app)?;
        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(QueryBuffer::new(schema::ADDITIONAL_APP_TABLE.name, rows))
    }

    /// Playlists whose title is in `titles`.
    pub fn query_playlists(
        &self,
        titles: &BTreeSet<String>,
    ) -> Result<QueryBuffer<FpPlaylist>, FlashpointError> {
        if titles.is_empty() {
            return Ok(QueryBuffer::new(schema::PLAYLIST_TABLE.name, Vec::new()));
        }

        let placeholders = vec!["?"; titles.len()].join(", ");
        let sql = format!(
            "SELECT id, title, description, author FROM playlist
             WHERE title IN ({placeholders})
             ORDER BY title, id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(titles.iter()), row_to_playlist)?;
        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(QueryBuffer::new(schema::PLAYLIST_TABLE.name, rows))
    }

    /// The entries of one playlist, in playlist order.
    pub fn query_playlist_games(
        &self,
        playlist: &FpPlaylist,
    ) -> Result<QueryBuffer<FpPlaylistGame>, FlashpointError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, playlistId, \"order\", gameId FROM playlist_game
             WHERE playlistId = ?1
             ORDER BY \"order\", id",
        )?;
        let rows = stmt.query_map([playlist.id.to_string()], row_to_playlist_game)?;
        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(QueryBuffer::new(playlist.title.clone(), rows))
    }
}

// ── Row Mappers ─────────────────────────────────────────────────────────────

fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn flag_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(row.get::<_, Option<bool>>(idx)?.unwrap_or(false))
}

fn row_to_game(row: &Row<'_>) -> rusqlite::Result<FpGame> {
    Ok(FpGame {
        id: uuid_at(row, 0)?,
        title: text_at(row, 1)?,
        series: text_at(row, 2)?,
        developer: text_at(row, 3)?,
        publisher: text_at(row, 4)?,
        date_added: text_at(row, 5)?,
        date_modified: text_at(row, 6)?,
        platform: text_at(row, 7)?,
        broken: flag_at(row, 8)?,
        extreme: flag_at(row, 9)?,
        play_mode: text_at(row, 10)?,
        status: text_at(row, 11)?,
        notes: text_at(row, 12)?,
        source: text_at(row, 13)?,
        app_path: text_at(row, 14)?,
        launch_command: text_at(row, 15)?,
        release_date: text_at(row, 16)?,
        version: text_at(row, 17)?,
        original_description: text_at(row, 18)?,
        language: text_at(row, 19)?,
        library: text_at(row, 20)?,
        order_title: text_at(row, 21)?,
    })
}

fn row_to_add_app(row: &Row<'_>) -> rusqlite::Result<FpAddApp> {
    Ok(FpAddApp {
        id: uuid_at(row, 0)?,
        app_path: text_at(row, 1)?,
        auto_run_before: flag_at(row, 2)?,
        launch_command: text_at(row, 3)?,
        name: text_at(row, 4)?,
        wait_for_exit: flag_at(row, 5)?,
        parent_game_id: uuid_at(row, 6)?,
    })
}

fn row_to_playlist(row: &Row<'_>) -> rusqlite::Result<FpPlaylist> {
    Ok(FpPlaylist {
        id: uuid_at(row, 0)?,
        title: text_at(row, 1)?,
        description: text_at(row, 2)?,
        author: text_at(row, 3)?,
    })
}

fn row_to_playlist_game(row: &Row<'_>) -> rusqlite::Result<FpPlaylistGame> {
    Ok(FpPlaylistGame {
        id: row.get(0)?,
        playlist_id: uuid_at(row, 1)?,
        order: row.get::<_, Option<i32>>(2)?.unwrap_or(0),
        game_id: uuid_at(row, 3)?,
    })
}
