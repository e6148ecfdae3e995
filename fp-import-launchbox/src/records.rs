//! LaunchBox record kinds and their builders.
//!
//! Records are immutable from outside the crate: callers construct them with a
//! builder, and the document reader populates builders field-by-field from the
//! element names it encounters. Anything a builder does not recognize lands in
//! the record's other-fields map and is written back unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Unrecognized child elements of a record, by element name.
pub type OtherFields = BTreeMap<String, String>;

/// Format used when writing dates: ISO-8601 with milliseconds and offset.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Parse a date as LaunchBox or Flashpoint store it.
///
/// Accepts RFC 3339, naive date-times (taken as UTC), and the partial forms
/// `YYYY-MM-DD`, `YYYY-MM` and `YYYY` (first day of the period). Anything else
/// is `None`.
pub fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    let padded = match text.len() {
        4 => format!("{text}-01-01"),
        7 => format!("{text}-01"),
        _ => text.to_string(),
    };
    let date = NaiveDate::parse_from_str(&padded, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_bool(text: &str) -> bool {
    matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

pub(crate) fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn parse_id(kind: &str, text: &str) -> Result<Uuid, String> {
    Uuid::parse_str(text.trim()).map_err(|_| format!("invalid {kind} '{text}'"))
}

// ── Game ────────────────────────────────────────────────────────────────────

pub mod game_fields {
    pub const ELEMENT: &str = "Game";
    pub const ID: &str = "ID";
    pub const TITLE: &str = "Title";
    pub const SERIES: &str = "Series";
    pub const DEVELOPER: &str = "Developer";
    pub const PUBLISHER: &str = "Publisher";
    pub const PLATFORM: &str = "Platform";
    pub const SORT_TITLE: &str = "SortTitle";
    pub const DATE_ADDED: &str = "DateAdded";
    pub const DATE_MODIFIED: &str = "DateModified";
    pub const BROKEN: &str = "Broken";
    pub const PLAY_MODE: &str = "PlayMode";
    pub const STATUS: &str = "Status";
    pub const REGION: &str = "Region";
    pub const NOTES: &str = "Notes";
    pub const SOURCE: &str = "Source";
    pub const APP_PATH: &str = "ApplicationPath";
    pub const COMMAND_LINE: &str = "CommandLine";
    pub const RELEASE_DATE: &str = "ReleaseDate";
    pub const VERSION: &str = "Version";
    pub const RELEASE_TYPE: &str = "ReleaseType";
}

/// A game entry of a platform document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) series: String,
    pub(crate) developer: String,
    pub(crate) publisher: String,
    pub(crate) platform: String,
    pub(crate) sort_title: String,
    pub(crate) date_added: Option<DateTime<FixedOffset>>,
    pub(crate) date_modified: Option<DateTime<FixedOffset>>,
    pub(crate) broken: bool,
    pub(crate) play_mode: String,
    pub(crate) status: String,
    pub(crate) region: String,
    pub(crate) notes: String,
    pub(crate) source: String,
    pub(crate) app_path: String,
    pub(crate) command_line: String,
    pub(crate) release_date: Option<DateTime<FixedOffset>>,
    pub(crate) version: String,
    pub(crate) release_type: String,
    pub(crate) other_fields: OtherFields,
}

impl Game {
    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn series(&self) -> &str {
        &self.series
    }
    pub fn developer(&self) -> &str {
        &self.developer
    }
    pub fn publisher(&self) -> &str {
        &self.publisher
    }
    pub fn platform(&self) -> &str {
        &self.platform
    }
    pub fn sort_title(&self) -> &str {
        &self.sort_title
    }
    pub fn date_added(&self) -> Option<DateTime<FixedOffset>> {
        self.date_added
    }
    pub fn date_modified(&self) -> Option<DateTime<FixedOffset>> {
        self.date_modified
    }
    pub fn is_broken(&self) -> bool {
        self.broken
    }
    pub fn play_mode(&self) -> &str {
        &self.play_mode
    }
    pub fn status(&self) -> &str {
        &self.status
    }
    pub fn region(&self) -> &str {
        &self.region
    }
    pub fn notes(&self) -> &str {
        &self.notes
    }
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn app_path(&self) -> &str {
        &self.app_path
    }
    pub fn command_line(&self) -> &str {
        &self.command_line
    }
    pub fn release_date(&self) -> Option<DateTime<FixedOffset>> {
        self.release_date
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn release_type(&self) -> &str {
        &self.release_type
    }
    pub fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}

/// Builds a [`Game`].
#[derive(Debug, Clone, Default)]
pub struct GameBuilder {
    id: Option<Uuid>,
    game: GameFields,
}

// Everything but the id, which the reader may not have seen yet.
#[derive(Debug, Clone, Default)]
struct GameFields {
    title: String,
    series: String,
    developer: String,
    publisher: String,
    platform: String,
    sort_title: String,
    date_added: Option<DateTime<FixedOffset>>,
    date_modified: Option<DateTime<FixedOffset>>,
    broken: bool,
    play_mode: String,
    status: String,
    region: String,
    notes: String,
    source: String,
    app_path: String,
    command_line: String,
    release_date: Option<DateTime<FixedOffset>>,
    version: String,
    release_type: String,
    other_fields: OtherFields,
}

impl GameBuilder {
    pub fn new(id: Uuid) -> Self {
        Self {
            id: Some(id),
            game: GameFields::default(),
        }
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.game.title = v.into();
        self
    }
    pub fn series(mut self, v: impl Into<String>) -> Self {
        self.game.series = v.into();
        self
    }
    pub fn developer(mut self, v: impl Into<String>) -> Self {
        self.game.developer = v.into();
        self
    }
    pub fn publisher(mut self, v: impl Into<String>) -> Self {
        self.game.publisher = v.into();
        self
    }
    pub fn platform(mut self, v: impl Into<String>) -> Self {
        self.game.platform = v.into();
        self
    }
    pub fn sort_title(mut self, v: impl Into<String>) -> Self {
        self.game.sort_title = v.into();
        self
    }
    pub fn date_added(mut self, v: Option<DateTime<FixedOffset>>) -> Self {
        self.game.date_added = v;
        self
    }
    pub fn date_modified(mut self, v: Option<DateTime<FixedOffset>>) -> Self {
        self.game.date_modified = v;
        self
    }
    pub fn broken(mut self, v: bool) -> Self {
        self.game.broken = v;
        self
    }
    pub fn play_mode(mut self, v: impl Into<String>) -> Self {
        self.game.play_mode = v.into();
        self
    }
    pub fn status(mut self, v: impl Into<String>) -> Self {
        self.game.status = v.into();
        self
    }
    pub fn region(mut self, v: impl Into<String>) -> Self {
        self.game.region = v.into();
        self
    }
    pub fn notes(mut self, v: impl Into<String>) -> Self {
        self.game.notes = v.into();
        self
    }
    pub fn source(mut self, v: impl Into<String>) -> Self {
        self.game.source = v.into();
        self
    }
    pub fn app_path(mut self, v: impl Into<String>) -> Self {
        self.game.app_path = v.into();
        self
    }
    pub fn command_line(mut self, v: impl Into<String>) -> Self {
        self.game.command_line = v.into();
        self
    }
    pub fn release_date(mut self, v: Option<DateTime<FixedOffset>>) -> Self {
        self.game.release_date = v;
        self
    }
    pub fn version(mut self, v: impl Into<String>) -> Self {
        self.game.version = v.into();
        self
    }
    pub fn release_type(mut self, v: impl Into<String>) -> Self {
        self.game.release_type = v.into();
        self
    }
    pub fn other_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.game.other_fields.insert(name.into(), value.into());
        self
    }

    /// Populate one field from its element name and text.
    pub(crate) fn set_field(&mut self, name: &str, value: String) -> Result<(), String> {
        use game_fields::*;
        let g = &mut self.game;
        match name {
            ID => self.id = Some(parse_id("game ID", &value)?),
            TITLE => g.title = value,
            SERIES => g.series = value,
            DEVELOPER => g.developer = value,
            PUBLISHER => g.publisher = value,
            PLATFORM => g.platform = value,
            SORT_TITLE => g.sort_title = value,
            DATE_ADDED => g.date_added = parse_date(&value),
            DATE_MODIFIED => g.date_modified = parse_date(&value),
            BROKEN => g.broken = parse_bool(&value),
            PLAY_MODE => g.play_mode = value,
            STATUS => g.status = value,
            REGION => g.region = value,
            NOTES => g.notes = value,
            SOURCE => g.source = value,
            APP_PATH => g.app_path = value,
            COMMAND_LINE => g.command_line = value,
            RELEASE_DATE => g.release_date = parse_date(&value),
            VERSION => g.version = value,
            RELEASE_TYPE => g.release_type = value,
            _ => {
                g.other_fields.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    /// Finish a game read from a document, which must have carried an id.
    pub(crate) fn finish(self) -> Result<Game, String> {
        let id = self.id.ok_or_else(|| "game without an ID".to_string())?;
        Ok(Self::assemble(id, self.game))
    }

    pub fn build(self) -> Game {
        Self::assemble(self.id.unwrap_or_default(), self.game)
    }

    fn assemble(id: Uuid, g: GameFields) -> Game {
        Game {
            id,
            title: g.title,
            series: g.series,
            developer: g.developer,
            publisher: g.publisher,
            platform: g.platform,
            sort_title: g.sort_title,
            date_added: g.date_added,
            date_modified: g.date_modified,
            broken: g.broken,
            play_mode: g.play_mode,
            status: g.status,
            region: g.region,
            notes: g.notes,
            source: g.source,
            app_path: g.app_path,
            command_line: g.command_line,
            release_date: g.release_date,
            version: g.version,
            release_type: g.release_type,
            other_fields: g.other_fields,
        }
    }
}

// ── Additional Application ──────────────────────────────────────────────────

pub mod add_app_fields {
    pub const ELEMENT: &str = "AdditionalApplication";
    pub const ID: &str = "Id";
    pub const GAME_ID: &str = "GameID";
    pub const APP_PATH: &str = "ApplicationPath";
    pub const COMMAND_LINE: &str = "CommandLine";
    pub const AUTORUN_BEFORE: &str = "AutoRunBefore";
    pub const NAME: &str = "Name";
    pub const WAIT_FOR_EXIT: &str = "WaitForExit";
}

/// An additional application attached to a game of a platform document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddApp {
    pub(crate) id: Uuid,
    pub(crate) game_id: Uuid,
    pub(crate) app_path: String,
    pub(crate) command_line: String,
    pub(crate) autorun_before: bool,
    pub(crate) name: String,
    pub(crate) wait_for_exit: bool,
    pub(crate) other_fields: OtherFields,
}

impl AddApp {
    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }
    pub fn app_path(&self) -> &str {
        &self.app_path
    }
    pub fn command_line(&self) -> &str {
        &self.command_line
    }
    pub fn is_autorun_before(&self) -> bool {
        self.autorun_before
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_wait_for_exit(&self) -> bool {
        self.wait_for_exit
    }
    pub fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}

/// Builds an [`AddApp`].
#[derive(Debug, Clone, Default)]
pub struct AddAppBuilder {
    id: Option<Uuid>,
    game_id: Option<Uuid>,
    app_path: String,
    command_line: String,
    autorun_before: bool,
    name: String,
    wait_for_exit: bool,
    other_fields: OtherFields,
}

impl AddAppBuilder {
    pub fn new(id: Uuid, game_id: Uuid) -> Self {
        Self {
            id: Some(id),
            game_id: Some(game_id),
            ..Self::default()
        }
    }

    pub fn app_path(mut self, v: impl Into<String>) -> Self {
        self.app_path = v.into();
        self
    }
    pub fn command_line(mut self, v: impl Into<String>) -> Self {
        self.command_line = v.into();
        self
    }
    pub fn autorun_before(mut self, v: bool) -> Self {
        self.autorun_before = v;
        self
    }
    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = v.into();
        self
    }
    pub fn wait_for_exit(mut self, v: bool) -> Self {
        self.wait_for_exit = v;
        self
    }
    pub fn other_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_fields.insert(name.into(), value.into());
        self
    }

    pub(crate) fn set_field(&mut self, name: &str, value: String) -> Result<(), String> {
        use add_app_fields::*;
        match name {
            ID => self.id = Some(parse_id("additional application Id", &value)?),
            GAME_ID => self.game_id = Some(parse_id("additional application GameID", &value)?),
            APP_PATH => self.app_path = value,
            COMMAND_LINE => self.command_line = value,
            AUTORUN_BEFORE => self.autorun_before = parse_bool(&value),
            NAME => self.name = value,
            WAIT_FOR_EXIT => self.wait_for_exit = parse_bool(&value),
            _ => {
                self.other_fields.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<AddApp, String> {
        if self.id.is_none() {
            return Err("additional application without an Id".to_string());
        }
        if self.game_id.is_none() {
            return Err("additional application without a GameID".to_string());
        }
        Ok(self.build())
    }

    pub fn build(self) -> AddApp {
        AddApp {
            id: self.id.unwrap_or_default(),
            game_id: self.game_id.unwrap_or_default(),
            app_path: self.app_path,
            command_line: self.command_line,
            autorun_before: self.autorun_before,
            name: self.name,
            wait_for_exit: self.wait_for_exit,
            other_fields: self.other_fields,
        }
    }
}

// ── Playlist Header ─────────────────────────────────────────────────────────

pub mod playlist_header_fields {
    pub const ELEMENT: &str = "Playlist";
    pub const ID: &str = "PlaylistId";
    pub const NAME: &str = "Name";
    pub const NESTED_NAME: &str = "NestedName";
    pub const NOTES: &str = "Notes";
}

/// The single header element of a playlist document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistHeader {
    pub(crate) playlist_id: Uuid,
    pub(crate) name: String,
    pub(crate) nested_name: String,
    pub(crate) notes: String,
    pub(crate) other_fields: OtherFields,
}

impl PlaylistHeader {
    pub fn playlist_id(&self) -> Uuid {
        self.playlist_id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn nested_name(&self) -> &str {
        &self.nested_name
    }
    pub fn notes(&self) -> &str {
        &self.notes
    }
    pub fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}

/// Builds a [`PlaylistHeader`].
#[derive(Debug, Clone, Default)]
pub struct PlaylistHeaderBuilder {
    playlist_id: Option<Uuid>,
    name: String,
    nested_name: String,
    notes: String,
    other_fields: OtherFields,
}

impl PlaylistHeaderBuilder {
    pub fn new(playlist_id: Uuid) -> Self {
        Self {
            playlist_id: Some(playlist_id),
            ..Self::default()
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = v.into();
        self
    }
    pub fn nested_name(mut self, v: impl Into<String>) -> Self {
        self.nested_name = v.into();
        self
    }
    pub fn notes(mut self, v: impl Into<String>) -> Self {
        self.notes = v.into();
        self
    }
    pub fn other_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_fields.insert(name.into(), value.into());
        self
    }

    pub(crate) fn set_field(&mut self, name: &str, value: String) -> Result<(), String> {
        use playlist_header_fields::*;
        match name {
            ID => self.playlist_id = Some(parse_id("PlaylistId", &value)?),
            NAME => self.name = value,
            NESTED_NAME => self.nested_name = value,
            NOTES => self.notes = value,
            _ => {
                self.other_fields.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<PlaylistHeader, String> {
        if self.playlist_id.is_none() {
            return Err("playlist header without a PlaylistId".to_string());
        }
        Ok(self.build())
    }

    pub fn build(self) -> PlaylistHeader {
        PlaylistHeader {
            playlist_id: self.playlist_id.unwrap_or_default(),
            name: self.name,
            nested_name: self.nested_name,
            notes: self.notes,
            other_fields: self.other_fields,
        }
    }
}

// ── Playlist Game ───────────────────────────────────────────────────────────

pub mod playlist_game_fields {
    pub const ELEMENT: &str = "PlaylistGame";
    pub const ID: &str = "GameId";
    pub const GAME_TITLE: &str = "GameTitle";
    pub const GAME_FILE_NAME: &str = "GameFileName";
    pub const GAME_PLATFORM: &str = "GamePlatform";
    pub const MANUAL_ORDER: &str = "ManualOrder";
    pub const LB_DB_ID: &str = "LaunchBoxDbId";
}

/// Marks a playlist game whose database id has not been assigned.
pub const UNASSIGNED_DB_ID: i64 = -1;

/// One entry of a playlist document, keyed by the game it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistGame {
    pub(crate) game_id: Uuid,
    pub(crate) game_title: String,
    pub(crate) game_file_name: String,
    pub(crate) game_platform: String,
    pub(crate) manual_order: i32,
    pub(crate) lb_db_id: i64,
    pub(crate) other_fields: OtherFields,
}

impl PlaylistGame {
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }
    pub fn game_title(&self) -> &str {
        &self.game_title
    }
    pub fn game_file_name(&self) -> &str {
        &self.game_file_name
    }
    pub fn game_platform(&self) -> &str {
        &self.game_platform
    }
    pub fn manual_order(&self) -> i32 {
        self.manual_order
    }
    /// The playlist-local database id, or [`UNASSIGNED_DB_ID`].
    pub fn lb_db_id(&self) -> i64 {
        self.lb_db_id
    }
    pub fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}

/// Builds a [`PlaylistGame`].
///
/// The database id is never set by callers; playlist documents assign it.
#[derive(Debug, Clone)]
pub struct PlaylistGameBuilder {
    game_id: Option<Uuid>,
    game_title: String,
    game_file_name: String,
    game_platform: String,
    manual_order: i32,
    lb_db_id: i64,
    other_fields: OtherFields,
}

impl Default for PlaylistGameBuilder {
    fn default() -> Self {
        Self {
            game_id: None,
            game_title: String::new(),
            game_file_name: String::new(),
            game_platform: String::new(),
            manual_order: 0,
            lb_db_id: UNASSIGNED_DB_ID,
            other_fields: OtherFields::new(),
        }
    }
}

impl PlaylistGameBuilder {
    pub fn new(game_id: Uuid) -> Self {
        Self {
            game_id: Some(game_id),
            ..Self::default()
        }
    }

    pub fn game_title(mut self, v: impl Into<String>) -> Self {
        self.game_title = v.into();
        self
    }
    pub fn game_file_name(mut self, v: impl Into<String>) -> Self {
        self.game_file_name = v.into();
        self
    }
    pub fn game_platform(mut self, v: impl Into<String>) -> Self {
        self.game_platform = v.into();
        self
    }
    pub fn manual_order(mut self, v: i32) -> Self {
        self.manual_order = v;
        self
    }
    pub fn other_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_fields.insert(name.into(), value.into());
        self
    }

    pub(crate) fn set_field(&mut self, name: &str, value: String) -> Result<(), String> {
        use playlist_game_fields::*;
        match name {
            ID => self.game_id = Some(parse_id("playlist GameId", &value)?),
            GAME_TITLE => self.game_title = value,
            GAME_FILE_NAME => self.game_file_name = value,
            GAME_PLATFORM => self.game_platform = value,
            MANUAL_ORDER => self.manual_order = value.trim().parse().unwrap_or(0),
            LB_DB_ID => {
                self.lb_db_id = value.trim().parse().unwrap_or(UNASSIGNED_DB_ID);
            }
            _ => {
                self.other_fields.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<PlaylistGame, String> {
        if self.game_id.is_none() {
            return Err("playlist game without a GameId".to_string());
        }
        Ok(self.build())
    }

    pub fn build(self) -> PlaylistGame {
        PlaylistGame {
            game_id: self.game_id.unwrap_or_default(),
            game_title: self.game_title,
            game_file_name: self.game_file_name,
            game_platform: self.game_platform,
            manual_order: self.manual_order,
            lb_db_id: self.lb_db_id,
            other_fields: self.other_fields,
        }
    }
}

// ── Platform Config Entries ─────────────────────────────────────────────────

pub mod platform_config_fields {
    pub const PLATFORM: &str = "Platform";
    pub const PLATFORM_NAME: &str = "Name";
    pub const PLATFORM_FOLDER: &str = "PlatformFolder";
    pub const FOLDER_MEDIA_TYPE: &str = "MediaType";
    pub const FOLDER_PATH: &str = "FolderPath";
    pub const FOLDER_PLATFORM: &str = "Platform";
    pub const PLATFORM_CATEGORY: &str = "PlatformCategory";
}

/// A platform registered in `Platforms.xml`. Only its name is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    pub(crate) other_fields: OtherFields,
}

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        let mut other_fields = OtherFields::new();
        other_fields.insert(platform_config_fields::PLATFORM_NAME.to_string(), name.into());
        Self { other_fields }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_fields.insert(name.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.other_fields
            .get(platform_config_fields::PLATFORM_NAME)
            .map(String::as_str)
    }

    pub fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}

/// A platform category of `Platforms.xml`, kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformCategory {
    pub(crate) other_fields: OtherFields,
}

impl PlatformCategory {
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_fields.insert(name.into(), value.into());
        self
    }

    pub fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}
