//! LaunchBox documents and the merge policy applied to them.
//!
//! A platform or playlist document keeps the records it was opened with in
//! an *existing* bucket. Each record merged in moves its key to the *final*
//! bucket; [`finalize`](PlatformDoc::finalize) then decides whether records
//! that were never touched survive. Only the final bucket is written.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use fp_import_core::FreeIndexTracker;
use uuid::Uuid;

use crate::error::LaunchBoxError;
use crate::records::*;
use crate::xml::{DocReader, DocWriter, RawElement};

// ── Handles ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocKind {
    Platform,
    Playlist,
    PlatformConfig,
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKind::Platform => write!(f, "platform"),
            DocKind::Playlist => write!(f, "playlist"),
            DocKind::PlatformConfig => write!(f, "platform config"),
        }
    }
}

/// Identity of one logical document; equal handles denote the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentHandle {
    pub kind: DocKind,
    pub name: String,
}

impl DocumentHandle {
    pub fn new(kind: DocKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} document '{}'", self.kind, self.name)
    }
}

// ── Options ─────────────────────────────────────────────────────────────────

/// What happens when an incoming record's key is already in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// Keep the document's record; the incoming one is discarded.
    NewOnly,
    /// Take the incoming record, carrying over the document's other-fields.
    #[default]
    NewAndExisting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    pub import_mode: ImportMode,
    /// Drop records that were in the document but not merged again.
    pub remove_obsolete: bool,
}

// ── Merge Buckets ───────────────────────────────────────────────────────────

/// How a merged record was disposed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Updated,
    Kept,
}

pub(crate) trait Keyed {
    fn key(&self) -> Uuid;
    fn other_fields_mut(&mut self) -> &mut OtherFields;
    fn other_fields(&self) -> &OtherFields;

    /// Take over what must survive from the record this one replaces.
    fn carry_over(&mut self, prior: &Self) {
        let fields = self.other_fields_mut();
        for (name, value) in prior.other_fields() {
            fields.insert(name.clone(), value.clone());
        }
    }
}

impl Keyed for Game {
    fn key(&self) -> Uuid {
        self.id
    }
    fn other_fields_mut(&mut self) -> &mut OtherFields {
        &mut self.other_fields
    }
    fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}

impl Keyed for AddApp {
    fn key(&self) -> Uuid {
        self.id
    }
    fn other_fields_mut(&mut self) -> &mut OtherFields {
        &mut self.other_fields
    }
    fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
}

impl Keyed for PlaylistGame {
    fn key(&self) -> Uuid {
        self.game_id
    }
    fn other_fields_mut(&mut self) -> &mut OtherFields {
        &mut self.other_fields
    }
    fn other_fields(&self) -> &OtherFields {
        &self.other_fields
    }
    fn carry_over(&mut self, prior: &Self) {
        for (name, value) in &prior.other_fields {
            self.other_fields.insert(name.clone(), value.clone());
        }
        self.lb_db_id = prior.lb_db_id;
    }
}

/// Existing and final records of one kind, keyed by id.
#[derive(Debug, Clone)]
pub(crate) struct Bucket<R> {
    existing: BTreeMap<Uuid, R>,
    finals: BTreeMap<Uuid, R>,
}

impl<R> Default for Bucket<R> {
    fn default() -> Self {
        Self {
            existing: BTreeMap::new(),
            finals: BTreeMap::new(),
        }
    }
}

impl<R: Keyed> Bucket<R> {
    /// Add a record read from the document.
    fn load(&mut self, record: R) {
        if let Some(dup) = self.existing.insert(record.key(), record) {
            log::warn!("Duplicate record {} in document; keeping the later one", dup.key());
        }
    }

    /// Merge an incoming record. `on_insert` runs on records with a new key.
    ///
    /// A key already finalized is merged against its final record, so merging
    /// the same record twice leaves the bucket unchanged.
    fn merge(
        &mut self,
        mut incoming: R,
        mode: ImportMode,
        on_insert: impl FnOnce(&mut R),
    ) -> MergeOutcome {
        let key = incoming.key();
        let prior = self
            .existing
            .remove(&key)
            .or_else(|| self.finals.remove(&key));

        let (record, outcome) = match (prior, mode) {
            (None, _) => {
                on_insert(&mut incoming);
                (incoming, MergeOutcome::Inserted)
            }
            (Some(prior), ImportMode::NewOnly) => (prior, MergeOutcome::Kept),
            (Some(prior), ImportMode::NewAndExisting) => {
                incoming.carry_over(&prior);
                (incoming, MergeOutcome::Updated)
            }
        };
        self.finals.insert(key, record);
        outcome
    }

    fn finalize(&mut self, remove_obsolete: bool) -> usize {
        let leftover = std::mem::take(&mut self.existing);
        let count = leftover.len();
        if !remove_obsolete {
            self.finals.extend(leftover);
        }
        count
    }

    pub fn existing(&self) -> &BTreeMap<Uuid, R> {
        &self.existing
    }

    pub fn finals(&self) -> &BTreeMap<Uuid, R> {
        &self.finals
    }
}

// ── Document Plumbing ───────────────────────────────────────────────────────

/// The file backing an open document.
#[derive(Debug)]
pub struct DocFile {
    pub(crate) handle: DocumentHandle,
    pub(crate) path: PathBuf,
    pub(crate) file: File,
}

pub(crate) mod sealed {
    use super::*;

    /// Codec entry points shared by every document kind.
    pub trait DocumentImpl {
        fn file(&self) -> &DocFile;
        fn file_mut(&mut self) -> &mut DocFile;
        fn read_body(
            &mut self,
            reader: &mut DocReader<'_>,
            tracker: &mut FreeIndexTracker,
        ) -> Result<(), LaunchBoxError>;
        fn write_body(&self, writer: &mut DocWriter);

        /// Allocator ids claimed by the records this document writes.
        fn held_ids(&self) -> Vec<u32> {
            Vec::new()
        }
    }
}

/// A document opened through an [`Install`](crate::Install).
pub trait Document: sealed::DocumentImpl {
    fn handle(&self) -> &DocumentHandle {
        &self.file().handle
    }

    fn path(&self) -> &Path {
        &self.file().path
    }
}

impl<T: sealed::DocumentImpl> Document for T {}

// ── Platform Document ───────────────────────────────────────────────────────

/// `Data/Platforms/<platform>.xml`: the games of one platform and their
/// additional applications.
#[derive(Debug)]
pub struct PlatformDoc {
    file: DocFile,
    options: UpdateOptions,
    games: Bucket<Game>,
    add_apps: Bucket<AddApp>,
    passthrough: Vec<RawElement>,
}

impl PlatformDoc {
    pub(crate) fn new(file: DocFile, options: UpdateOptions) -> Self {
        Self {
            file,
            options,
            games: Bucket::default(),
            add_apps: Bucket::default(),
            passthrough: Vec::new(),
        }
    }

    pub fn options(&self) -> UpdateOptions {
        self.options
    }

    pub fn add_game(&mut self, game: Game) -> MergeOutcome {
        self.games.merge(game, self.options.import_mode, |_| {})
    }

    pub fn add_add_app(&mut self, add_app: AddApp) -> MergeOutcome {
        self.add_apps.merge(add_app, self.options.import_mode, |_| {})
    }

    pub fn contains_game(&self, id: &Uuid) -> bool {
        self.games.existing.contains_key(id) || self.games.finals.contains_key(id)
    }

    pub fn existing_games(&self) -> &BTreeMap<Uuid, Game> {
        self.games.existing()
    }

    pub fn final_games(&self) -> &BTreeMap<Uuid, Game> {
        self.games.finals()
    }

    pub fn existing_add_apps(&self) -> &BTreeMap<Uuid, AddApp> {
        self.add_apps.existing()
    }

    pub fn final_add_apps(&self) -> &BTreeMap<Uuid, AddApp> {
        self.add_apps.finals()
    }

    /// Unrecognized top-level elements, written back after the records.
    pub fn passthrough(&self) -> &[RawElement] {
        &self.passthrough
    }

    /// Dispose of records that were not merged and empty the existing bucket.
    ///
    /// Returns how many untouched records were dropped or retained.
    pub fn finalize(&mut self) -> usize {
        let remove = self.options.remove_obsolete;
        let count = self.games.finalize(remove) + self.add_apps.finalize(remove);
        if remove && count > 0 {
            log::debug!("Removed {count} obsolete records from {}", self.file.handle);
        }
        count
    }
}

impl sealed::DocumentImpl for PlatformDoc {
    fn file(&self) -> &DocFile {
        &self.file
    }

    fn file_mut(&mut self) -> &mut DocFile {
        &mut self.file
    }

    fn read_body(
        &mut self,
        reader: &mut DocReader<'_>,
        _tracker: &mut FreeIndexTracker,
    ) -> Result<(), LaunchBoxError> {
        while let Some(child) = reader.next_child()? {
            match child.name.as_str() {
                game_fields::ELEMENT => {
                    let mut builder = GameBuilder::default();
                    reader.read_fields(&child, |name, value| builder.set_field(name, value))?;
                    let game = builder
                        .finish()
                        .map_err(|msg| LaunchBoxError::parse(reader.handle(), msg))?;
                    self.games.load(game);
                }
                add_app_fields::ELEMENT => {
                    let mut builder = AddAppBuilder::default();
                    reader.read_fields(&child, |name, value| builder.set_field(name, value))?;
                    let add_app = builder
                        .finish()
                        .map_err(|msg| LaunchBoxError::parse(reader.handle(), msg))?;
                    self.add_apps.load(add_app);
                }
                _ => self.passthrough.push(reader.read_raw(child)?),
            }
        }
        Ok(())
    }

    fn write_body(&self, writer: &mut DocWriter) {
        for game in self.games.finals.values() {
            write_game(writer, game);
        }
        for add_app in self.add_apps.finals.values() {
            write_add_app(writer, add_app);
        }
        for raw in &self.passthrough {
            writer.raw(raw);
        }
    }
}

fn write_date(writer: &mut DocWriter, name: &str, date: &Option<chrono::DateTime<chrono::FixedOffset>>) {
    if let Some(date) = date {
        writer.field(name, &format_date(date));
    }
}

fn write_game(writer: &mut DocWriter, game: &Game) {
    use game_fields::*;
    writer.start(ELEMENT);
    writer.field(ID, &game.id.to_string());
    writer.field(TITLE, &game.title);
    writer.field(SERIES, &game.series);
    writer.field(DEVELOPER, &game.developer);
    writer.field(PUBLISHER, &game.publisher);
    writer.field(PLATFORM, &game.platform);
    writer.field(SORT_TITLE, &game.sort_title);
    write_date(writer, DATE_ADDED, &game.date_added);
    write_date(writer, DATE_MODIFIED, &game.date_modified);
    writer.field(BROKEN, format_bool(game.broken));
    writer.field(PLAY_MODE, &game.play_mode);
    writer.field(STATUS, &game.status);
    writer.field(REGION, &game.region);
    writer.field(NOTES, &game.notes);
    writer.field(SOURCE, &game.source);
    writer.field(APP_PATH, &game.app_path);
    writer.field(COMMAND_LINE, &game.command_line);
    write_date(writer, RELEASE_DATE, &game.release_date);
    writer.field(VERSION, &game.version);
    writer.field(RELEASE_TYPE, &game.release_type);
    writer.fields(&game.other_fields);
    writer.end(ELEMENT);
}

fn write_add_app(writer: &mut DocWriter, add_app: &AddApp) {
    use add_app_fields::*;
    writer.start(ELEMENT);
    writer.field(ID, &add_app.id.to_string());
    writer.field(GAME_ID, &add_app.game_id.to_string());
    writer.field(APP_PATH, &add_app.app_path);
    writer.field(COMMAND_LINE, &add_app.command_line);
    writer.field(AUTORUN_BEFORE, format_bool(add_app.autorun_before));
    writer.field(NAME, &add_app.name);
    writer.field(WAIT_FOR_EXIT, format_bool(add_app.wait_for_exit));
    writer.fields(&add_app.other_fields);
    writer.end(ELEMENT);
}

// ── Playlist Document ───────────────────────────────────────────────────────

/// `Data/Playlists/<playlist>.xml`: a header and the games it lists.
#[derive(Debug)]
pub struct PlaylistDoc {
    file: DocFile,
    options: UpdateOptions,
    header: Option<PlaylistHeader>,
    games: Bucket<PlaylistGame>,
    passthrough: Vec<RawElement>,
}

impl PlaylistDoc {
    pub(crate) fn new(file: DocFile, options: UpdateOptions) -> Self {
        Self {
            file,
            options,
            header: None,
            games: Bucket::default(),
            passthrough: Vec::new(),
        }
    }

    pub fn options(&self) -> UpdateOptions {
        self.options
    }

    pub fn header(&self) -> Option<&PlaylistHeader> {
        self.header.as_ref()
    }

    /// Replace the header, keeping the other-fields of the current one.
    pub fn set_playlist_header(&mut self, mut header: PlaylistHeader) {
        if let Some(current) = &self.header {
            for (name, value) in &current.other_fields {
                header.other_fields.insert(name.clone(), value.clone());
            }
        }
        self.header = Some(header);
    }

    /// Merge a playlist game. New entries get the smallest free database id
    /// from `tracker`; replaced entries keep the id they had.
    pub fn add_playlist_game(
        &mut self,
        playlist_game: PlaylistGame,
        tracker: &mut FreeIndexTracker,
    ) -> MergeOutcome {
        self.games
            .merge(playlist_game, self.options.import_mode, |pg| {
                pg.lb_db_id = i64::from(tracker.reserve_first_free());
            })
    }

    pub fn contains_playlist_game(&self, game_id: &Uuid) -> bool {
        self.games.existing.contains_key(game_id) || self.games.finals.contains_key(game_id)
    }

    pub fn existing_playlist_games(&self) -> &BTreeMap<Uuid, PlaylistGame> {
        self.games.existing()
    }

    pub fn final_playlist_games(&self) -> &BTreeMap<Uuid, PlaylistGame> {
        self.games.finals()
    }

    pub fn passthrough(&self) -> &[RawElement] {
        &self.passthrough
    }

    pub fn finalize(&mut self) -> usize {
        self.games.finalize(self.options.remove_obsolete)
    }

    fn load_playlist_game(&mut self, mut pg: PlaylistGame, tracker: &mut FreeIndexTracker) {
        let claimed = u32::try_from(pg.lb_db_id)
            .map(|id| tracker.reserve(id))
            .unwrap_or(false);
        if !claimed {
            let id = tracker.reserve_first_free();
            log::debug!(
                "Playlist game {} in {} had unusable database id {}; reassigned {}",
                pg.game_id,
                self.file.handle,
                pg.lb_db_id,
                id
            );
            pg.lb_db_id = i64::from(id);
        }
        self.games.load(pg);
    }
}

impl sealed::DocumentImpl for PlaylistDoc {
    fn file(&self) -> &DocFile {
        &self.file
    }

    fn held_ids(&self) -> Vec<u32> {
        self.games
            .finals()
            .values()
            .filter_map(|pg| u32::try_from(pg.lb_db_id).ok())
            .collect()
    }

    fn file_mut(&mut self) -> &mut DocFile {
        &mut self.file
    }

    fn read_body(
        &mut self,
        reader: &mut DocReader<'_>,
        tracker: &mut FreeIndexTracker,
    ) -> Result<(), LaunchBoxError> {
        while let Some(child) = reader.next_child()? {
            match child.name.as_str() {
                playlist_header_fields::ELEMENT => {
                    let mut builder = PlaylistHeaderBuilder::default();
                    reader.read_fields(&child, |name, value| builder.set_field(name, value))?;
                    let header = builder
                        .finish()
                        .map_err(|msg| LaunchBoxError::parse(reader.handle(), msg))?;
                    self.header = Some(header);
                }
                playlist_game_fields::ELEMENT => {
                    let mut builder = PlaylistGameBuilder::default();
                    reader.read_fields(&child, |name, value| builder.set_field(name, value))?;
                    let pg = builder
                        .finish()
                        .map_err(|msg| LaunchBoxError::parse(reader.handle(), msg))?;
                    self.load_playlist_game(pg, tracker);
                }
                _ => self.passthrough.push(reader.read_raw(child)?),
            }
        }
        Ok(())
    }

    fn write_body(&self, writer: &mut DocWriter) {
        if let Some(header) = &self.header {
            use playlist_header_fields::*;
            writer.start(ELEMENT);
            writer.field(ID, &header.playlist_id.to_string());
            writer.field(NAME, &header.name);
            writer.field(NESTED_NAME, &header.nested_name);
            writer.field(NOTES, &header.notes);
            writer.fields(&header.other_fields);
            writer.end(ELEMENT);
        }

        // Playlist order rather than key order.
        let mut games: Vec<&PlaylistGame> = self.games.finals.values().collect();
        games.sort_by_key(|pg| (pg.manual_order, pg.game_id));
        for pg in games {
            use playlist_game_fields::*;
            writer.start(ELEMENT);
            writer.field(ID, &pg.game_id.to_string());
            writer.field(GAME_TITLE, &pg.game_title);
            writer.field(GAME_FILE_NAME, &pg.game_file_name);
            writer.field(GAME_PLATFORM, &pg.game_platform);
            writer.field(MANUAL_ORDER, &pg.manual_order.to_string());
            writer.field(LB_DB_ID, &pg.lb_db_id.to_string());
            writer.fields(&pg.other_fields);
            writer.end(ELEMENT);
        }

        for raw in &self.passthrough {
            writer.raw(raw);
        }
    }
}

// ── Platform Config Document ────────────────────────────────────────────────

pub const PLATFORM_CONFIG_NAME: &str = "Platforms";

/// `Data/Platforms.xml`: registered platforms, their media folders and the
/// platform categories.
#[derive(Debug)]
pub struct PlatformConfigDoc {
    file: DocFile,
    platforms: Vec<Platform>,
    /// platform -> media type -> folder path
    platform_folders: BTreeMap<String, BTreeMap<String, String>>,
    categories: Vec<PlatformCategory>,
    passthrough: Vec<RawElement>,
}

impl PlatformConfigDoc {
    pub(crate) fn new(file: DocFile) -> Self {
        Self {
            file,
            platforms: Vec::new(),
            platform_folders: BTreeMap::new(),
            categories: Vec::new(),
            passthrough: Vec::new(),
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn platform_folders(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.platform_folders
    }

    pub fn categories(&self) -> &[PlatformCategory] {
        &self.categories
    }

    pub fn contains_platform(&self, name: &str) -> bool {
        self.platforms.iter().any(|p| p.name() == Some(name))
    }

    /// Register a platform unless one with the same name already is.
    pub fn add_platform(&mut self, platform: Platform) -> bool {
        let duplicate = platform
            .name()
            .is_some_and(|name| self.contains_platform(name));
        if duplicate {
            return false;
        }
        self.platforms.push(platform);
        true
    }

    pub fn set_media_folder(
        &mut self,
        platform: impl Into<String>,
        media_type: impl Into<String>,
        folder_path: impl Into<String>,
    ) {
        self.platform_folders
            .entry(platform.into())
            .or_default()
            .insert(media_type.into(), folder_path.into());
    }

    fn read_platform_folder(
        &mut self,
        reader: &mut DocReader<'_>,
        child: &crate::xml::Child,
    ) -> Result<(), LaunchBoxError> {
        use platform_config_fields::*;
        let mut media_type = String::new();
        let mut folder_path = String::new();
        let mut platform = String::new();
        reader.read_fields(child, |name, value| {
            match name {
                FOLDER_MEDIA_TYPE => media_type = value,
                FOLDER_PATH => folder_path = value,
                FOLDER_PLATFORM => platform = value,
                other => return Err(format!("document type mismatch: unexpected <{other}> in <{PLATFORM_FOLDER}>")),
            }
            Ok(())
        })?;
        self.set_media_folder(platform, media_type, folder_path);
        Ok(())
    }
}

impl sealed::DocumentImpl for PlatformConfigDoc {
    fn file(&self) -> &DocFile {
        &self.file
    }

    fn file_mut(&mut self) -> &mut DocFile {
        &mut self.file
    }

    fn read_body(
        &mut self,
        reader: &mut DocReader<'_>,
        _tracker: &mut FreeIndexTracker,
    ) -> Result<(), LaunchBoxError> {
        use platform_config_fields::*;
        while let Some(child) = reader.next_child()? {
            match child.name.as_str() {
                PLATFORM => {
                    let mut platform = Platform::default();
                    reader.read_fields(&child, |name, value| {
                        platform.other_fields.insert(name.to_string(), value);
                        Ok(())
                    })?;
                    self.platforms.push(platform);
                }
                PLATFORM_FOLDER => self.read_platform_folder(reader, &child)?,
                PLATFORM_CATEGORY => {
                    let mut category = PlatformCategory::default();
                    reader.read_fields(&child, |name, value| {
                        category.other_fields.insert(name.to_string(), value);
                        Ok(())
                    })?;
                    self.categories.push(category);
                }
                _ => self.passthrough.push(reader.read_raw(child)?),
            }
        }
        Ok(())
    }

    fn write_body(&self, writer: &mut DocWriter) {
        use platform_config_fields::*;
        for platform in &self.platforms {
            writer.start(PLATFORM);
            writer.fields(&platform.other_fields);
            writer.end(PLATFORM);
        }
        for (platform, folders) in &self.platform_folders {
            for (media_type, folder_path) in folders {
                writer.start(PLATFORM_FOLDER);
                writer.field(FOLDER_MEDIA_TYPE, media_type);
                writer.field(FOLDER_PATH, folder_path);
                writer.field(FOLDER_PLATFORM, platform);
                writer.end(PLATFORM_FOLDER);
            }
        }
        for category in &self.categories {
            writer.start(PLATFORM_CATEGORY);
            writer.fields(&category.other_fields);
            writer.end(PLATFORM_CATEGORY);
        }
        for raw in &self.passthrough {
            writer.raw(raw);
        }
    }
}

#[cfg(test)]
#[path = "tests/doc_tests.rs"]
mod tests;
