//! The import run: query Flashpoint, merge into LaunchBox, roll back on failure.
//!
//! Everything is read from the Flashpoint database before the first LaunchBox
//! file is touched. Each platform and playlist document is then opened, merged,
//! finalized and saved in turn, with images transferred after their platform.
//! `Platforms.xml` is updated last. If any step fails, or progress asks to
//! cancel, every journaled change is reverted before the error is returned.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use fp_import_flashpoint::{
    FlashpointDb, FlashpointInstall, FpAddApp, FpGame, FpPlaylist, FpPlaylistGame, GAME_LIBRARY,
    QueryBuffer,
};
use fp_import_launchbox::install::{LOGO_FOLDER, SCREENSHOT_FOLDER};
use fp_import_launchbox::{
    ImageMode, Install, MergeOutcome, Platform, TransferOutcome, UpdateOptions,
};
use uuid::Uuid;

use crate::convert;
use crate::error::ImportError;
use crate::progress::ImportProgress;

/// What to import and how.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Flashpoint platforms to import; each becomes a LaunchBox platform.
    pub platforms: Vec<String>,
    /// Titles of the Flashpoint playlists to import.
    pub playlists: BTreeSet<String>,
    pub update: UpdateOptions,
    pub image_mode: ImageMode,
    /// Launcher written as every game's application path. Defaults to the
    /// Flashpoint install's launcher.
    pub launcher_path: Option<String>,
    /// Include games flagged as extreme.
    pub include_extreme: bool,
    /// Treat a failed image transfer as fatal instead of a warning.
    pub abort_on_image_error: bool,
    /// Restrict games to one Flashpoint library; `None` imports all of them.
    pub library: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            platforms: Vec::new(),
            playlists: BTreeSet::new(),
            update: UpdateOptions::default(),
            image_mode: ImageMode::default(),
            launcher_path: None,
            include_extreme: false,
            abort_on_image_error: false,
            library: Some(GAME_LIBRARY.to_string()),
        }
    }
}

/// Statistics from an import run.
#[derive(Debug, Default)]
pub struct ImportStats {
    pub platforms: usize,
    pub playlists: usize,
    pub games_inserted: usize,
    pub games_updated: usize,
    pub games_kept: usize,
    pub games_filtered: usize,
    pub add_apps: usize,
    pub playlist_games: usize,
    pub playlist_games_missing: usize,
    pub obsolete_removed: usize,
    pub images_transferred: usize,
    pub images_skipped: usize,
    pub image_warnings: Vec<String>,
}

impl ImportStats {
    fn count_game(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Inserted => self.games_inserted += 1,
            MergeOutcome::Updated => self.games_updated += 1,
            MergeOutcome::Kept => self.games_kept += 1,
        }
    }
}

/// Everything read from Flashpoint, gathered before LaunchBox is modified.
struct Queried {
    games: Vec<QueryBuffer<FpGame>>,
    add_apps: HashMap<Uuid, Vec<FpAddApp>>,
    playlists: Vec<(FpPlaylist, QueryBuffer<FpPlaylistGame>)>,
}

/// Runs one import between a Flashpoint install and a LaunchBox install.
pub struct ImportWorker<'a> {
    flashpoint: &'a FlashpointInstall,
    db: &'a FlashpointDb,
    launchbox: &'a mut Install,
    options: ImportOptions,
}

impl<'a> ImportWorker<'a> {
    pub fn new(
        flashpoint: &'a FlashpointInstall,
        db: &'a FlashpointDb,
        launchbox: &'a mut Install,
        options: ImportOptions,
    ) -> Self {
        Self {
            flashpoint,
            db,
            launchbox,
            options,
        }
    }

    /// Perform the import.
    ///
    /// On success every change is confirmed. On failure the LaunchBox install
    /// is restored to how it was found and the cause is returned.
    pub fn run(mut self, progress: &dyn ImportProgress) -> Result<ImportStats, ImportError> {
        if self.options.platforms.is_empty() && self.options.playlists.is_empty() {
            return Err(ImportError::NothingSelected);
        }

        let mut seen = HashSet::new();
        self.options.platforms.retain(|p| seen.insert(p.clone()));

        progress.on_phase("Checking Flashpoint database");
        self.db.require_schema()?;

        progress.on_phase("Reading Flashpoint database");
        let queried = self.query()?;

        let mut stats = ImportStats::default();
        match self.apply(&queried, &mut stats, progress) {
            Ok(()) => {
                self.launchbox.confirm_all_changes();
                progress.on_complete(&format!(
                    "Imported {} platform(s) and {} playlist(s)",
                    stats.platforms, stats.playlists
                ));
                Ok(stats)
            }
            Err(cause) => {
                progress.on_phase("Reverting changes");
                log::warn!("Import failed, reverting: {cause}");
                let failures = self.launchbox.revert_all_changes();
                for failure in &failures {
                    log::error!("{failure}");
                }
                self.launchbox.reset();
                if failures.is_empty() {
                    Err(cause)
                } else {
                    Err(ImportError::RevertIncomplete {
                        cause: Box::new(cause),
                        failures,
                    })
                }
            }
        }
    }

    fn query(&self) -> Result<Queried, ImportError> {
        let games = self
            .db
            .query_games(&self.options.platforms, self.options.library.as_deref())?;

        let mut add_apps: HashMap<Uuid, Vec<FpAddApp>> = HashMap::new();
        for add_app in self.db.query_additional_apps(true)? {
            add_apps
                .entry(add_app.parent_game_id)
                .or_default()
                .push(add_app);
        }

        let mut playlists = Vec::new();
        for playlist in self.db.query_playlists(&self.options.playlists)? {
            let entries = self.db.query_playlist_games(&playlist)?;
            playlists.push((playlist, entries));
        }
        for title in &self.options.playlists {
            if !playlists.iter().any(|(p, _)| &p.title == title) {
                log::warn!("Playlist '{title}' not found in Flashpoint");
            }
        }

        Ok(Queried {
            games,
            add_apps,
            playlists,
        })
    }

    fn launcher(&self) -> String {
        match &self.options.launcher_path {
            Some(path) => path.clone(),
            None => self.flashpoint.launcher_path().display().to_string(),
        }
    }

    fn apply(
        &mut self,
        queried: &Queried,
        stats: &mut ImportStats,
        progress: &dyn ImportProgress,
    ) -> Result<(), ImportError> {
        let include_extreme = self.options.include_extreme;
        let wanted = |game: &FpGame| include_extreme || !game.extreme;

        // Games that made it into LaunchBox, for resolving playlist entries.
        let mut imported: HashMap<Uuid, &FpGame> = HashMap::new();
        for buffer in &queried.games {
            for game in buffer.iter().filter(|g| wanted(*g)) {
                imported.insert(game.id, game);
            }
        }

        let mut tally = Tally {
            current: 0,
            total: imported.len()
                + queried
                    .playlists
                    .iter()
                    .map(|(_, entries)| entries.size())
                    .sum::<usize>(),
        };

        let platform_groups = group_by_path(&queried.games, |buffer| {
            self.launchbox.platform_doc_path(&buffer.source)
        });
        for group in &platform_groups {
            self.import_platform(group, queried, stats, &mut tally, progress)?;
            for buffer in group {
                let platform = buffer.source.as_str();
                progress.on_phase(&format!("Transferring images for {platform}"));
                for game in buffer.iter().filter(|g| wanted(*g)) {
                    cancel_point(progress)?;
                    self.transfer_images(platform, &game.id, stats, progress)?;
                }
            }
        }

        let playlist_groups = group_by_path(&queried.playlists, |(playlist, _)| {
            self.launchbox.playlist_doc_path(&playlist.title)
        });
        for group in &playlist_groups {
            self.import_playlist(group, &imported, stats, &mut tally, progress)?;
        }

        if !queried.games.is_empty() {
            progress.on_phase("Updating platform list");
            self.register_platforms(queried)?;
        }
        Ok(())
    }

    /// Merge platforms that share one document file into it.
    fn import_platform(
        &mut self,
        group: &[&QueryBuffer<FpGame>],
        queried: &Queried,
        stats: &mut ImportStats,
        tally: &mut Tally,
        progress: &dyn ImportProgress,
    ) -> Result<(), ImportError> {
        let Some(first) = group.first() else {
            return Ok(());
        };
        let launcher = self.launcher();
        let include_extreme = self.options.include_extreme;
        let mut doc = self
            .launchbox
            .open_platform_doc(&first.source, self.options.update)?;

        let mut merge = || -> Result<(), ImportError> {
            for buffer in group {
                progress.on_phase(&format!("Importing platform {}", buffer.source));
                for game in buffer.iter() {
                    if game.extreme && !include_extreme {
                        stats.games_filtered += 1;
                        continue;
                    }
                    cancel_point(progress)?;
                    stats.count_game(doc.add_game(convert::game_from_flashpoint(game, &launcher)));
                    for add_app in queried.add_apps.get(&game.id).into_iter().flatten() {
                        doc.add_add_app(convert::add_app_from_flashpoint(add_app, &launcher));
                        stats.add_apps += 1;
                    }
                    tally.current += 1;
                    progress.on_item(tally.current, tally.total, &game.title);
                }
            }
            Ok(())
        };
        if let Err(e) = merge() {
            self.launchbox.discard_document(doc);
            return Err(e);
        }

        stats.obsolete_removed += doc.finalize();
        self.launchbox.save_document(doc)?;
        stats.platforms += group.len();
        Ok(())
    }

    /// Merge playlists that share one document file into it. The first
    /// playlist supplies the header.
    fn import_playlist(
        &mut self,
        group: &[&(FpPlaylist, QueryBuffer<FpPlaylistGame>)],
        imported: &HashMap<Uuid, &FpGame>,
        stats: &mut ImportStats,
        tally: &mut Tally,
        progress: &dyn ImportProgress,
    ) -> Result<(), ImportError> {
        let Some((first, _)) = group.first() else {
            return Ok(());
        };
        if group.len() > 1 {
            log::warn!(
                "{} playlists share the file for '{}'; their entries are combined",
                group.len(),
                first.title
            );
        }
        let mut doc = self
            .launchbox
            .open_playlist_doc(&first.title, self.options.update)?;
        doc.set_playlist_header(convert::playlist_header_from_flashpoint(first));

        let tracker = self.launchbox.id_tracker_mut();
        let mut merge = || -> Result<(), ImportError> {
            for (playlist, entries) in group.iter().copied() {
                progress.on_phase(&format!("Importing playlist {}", playlist.title));
                for entry in entries {
                    cancel_point(progress)?;
                    tally.current += 1;
                    let Some(game) = imported.get(&entry.game_id) else {
                        log::debug!(
                            "Skipping playlist entry {} of '{}': game was not imported",
                            entry.game_id,
                            playlist.title
                        );
                        stats.playlist_games_missing += 1;
                        continue;
                    };
                    doc.add_playlist_game(
                        convert::playlist_game_from_flashpoint(entry, game),
                        tracker,
                    );
                    stats.playlist_games += 1;
                    progress.on_item(tally.current, tally.total, &game.title);
                }
            }
            Ok(())
        };
        if let Err(e) = merge() {
            self.launchbox.discard_document(doc);
            return Err(e);
        }

        stats.obsolete_removed += doc.finalize();
        self.launchbox.save_document(doc)?;
        stats.playlists += group.len();
        Ok(())
    }

    fn transfer_images(
        &mut self,
        platform: &str,
        id: &Uuid,
        stats: &mut ImportStats,
        progress: &dyn ImportProgress,
    ) -> Result<(), ImportError> {
        let file_name = format!("{id}.{}", fp_import_flashpoint::install::IMAGE_EXT);
        let pairs = [
            (
                self.flashpoint.logo_path(id),
                self.launchbox.logo_dir(platform).join(&file_name),
            ),
            (
                self.flashpoint.screenshot_path(id),
                self.launchbox.screenshot_dir(platform).join(&file_name),
            ),
        ];

        for (src, dst) in pairs {
            if !src.exists() {
                continue;
            }
            match self
                .launchbox
                .transfer_image(self.options.image_mode, &src, &dst)
            {
                Ok(TransferOutcome::Transferred) => stats.images_transferred += 1,
                Ok(TransferOutcome::Skipped) => stats.images_skipped += 1,
                Err(e) if self.options.abort_on_image_error => return Err(e.into()),
                Err(e) => {
                    progress.on_warning(&e.to_string());
                    stats.image_warnings.push(e.to_string());
                }
            }
        }
        Ok(())
    }

    fn register_platforms(&mut self, queried: &Queried) -> Result<(), ImportError> {
        let mut doc = self.launchbox.open_platform_config_doc()?;
        for buffer in &queried.games {
            let name = buffer.source.as_str();
            if doc.add_platform(Platform::new(name)) {
                log::info!("Registered new platform '{name}'");
            }
            for folder in [LOGO_FOLDER, SCREENSHOT_FOLDER] {
                doc.set_media_folder(name, folder, &Install::media_folder_setting(name, folder));
            }
        }
        self.launchbox.save_document(doc)?;
        Ok(())
    }
}

/// Position in the combined game and playlist entry count.
struct Tally {
    current: usize,
    total: usize,
}

/// Group `items` by the document file each maps to, keeping first-seen order.
fn group_by_path<'q, T>(items: &'q [T], path: impl Fn(&T) -> PathBuf) -> Vec<Vec<&'q T>> {
    let mut groups: Vec<(PathBuf, Vec<&'q T>)> = Vec::new();
    for item in items {
        let key = path(item);
        match groups.iter_mut().find(|(p, _)| *p == key) {
            Some((_, group)) => group.push(item),
            None => groups.push((key, vec![item])),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}

fn cancel_point(progress: &dyn ImportProgress) -> Result<(), ImportError> {
    if progress.should_cancel() {
        Err(ImportError::Canceled)
    } else {
        Ok(())
    }
}
