//! A LaunchBox install and the transaction that modifies it.
//!
//! [`Install`] is the only way to open documents. Opening moves the current
//! file aside to its backup and journals the path; saving writes the merged
//! result and hands the file to the user. Everything done through an install
//! can be rolled back with [`revert_next_change`](Install::revert_next_change)
//! until [`confirm_all_changes`](Install::confirm_all_changes) is called.

use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fp_import_core::{FreeIndexTracker, backup_path, file_name_legal};

use crate::doc::{
    DocFile, DocKind, Document, DocumentHandle, PLATFORM_CONFIG_NAME, PlatformConfigDoc,
    PlatformDoc, PlaylistDoc, UpdateOptions,
};
use crate::error::{ImageTransferError, LaunchBoxError, RevertError};
use crate::image::{self, ImageMode, TransferOutcome};
use crate::journal::{RevertEntry, RevertJournal};
use crate::perms::{OwnerWritable, UserPermissions};
use crate::xml::{DocReader, DocWriter};

pub const PLATFORMS_PATH: &str = "Data/Platforms";
pub const PLAYLISTS_PATH: &str = "Data/Playlists";
pub const PLATFORM_CONFIG_PATH: &str = "Data/Platforms.xml";
pub const IMAGES_PATH: &str = "Images";
pub const LOGO_FOLDER: &str = "Box - Front";
pub const SCREENSHOT_FOLDER: &str = "Screenshot - Gameplay";
pub const XML_EXT: &str = "xml";

/// A LaunchBox install rooted at some directory.
pub struct Install {
    root: PathBuf,
    /// Live documents and the file each one will write.
    leased: HashMap<DocumentHandle, PathBuf>,
    /// Allocator ids held by documents saved during this batch.
    held_ids: HashMap<PathBuf, Vec<u32>>,
    tracker: FreeIndexTracker,
    journal: RevertJournal,
    permissions: Box<dyn UserPermissions>,
}

impl std::fmt::Debug for Install {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Install")
            .field("root", &self.root)
            .field("leased", &self.leased)
            .field("journal", &self.journal)
            .finish_non_exhaustive()
    }
}

impl Install {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_permissions(root, Box::new(OwnerWritable))
    }

    /// Use `permissions` instead of [`OwnerWritable`] after each save.
    pub fn with_permissions(
        root: impl Into<PathBuf>,
        permissions: Box<dyn UserPermissions>,
    ) -> Self {
        Self {
            root: root.into(),
            leased: HashMap::new(),
            held_ids: HashMap::new(),
            tracker: FreeIndexTracker::new(),
            journal: RevertJournal::new(),
            permissions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ── Layout ──────────────────────────────────────────────────────────────

    pub fn platforms_dir(&self) -> PathBuf {
        self.root.join(PLATFORMS_PATH)
    }

    pub fn playlists_dir(&self) -> PathBuf {
        self.root.join(PLAYLISTS_PATH)
    }

    pub fn platform_config_path(&self) -> PathBuf {
        self.root.join(PLATFORM_CONFIG_PATH)
    }

    pub fn platform_doc_path(&self, name: &str) -> PathBuf {
        self.platforms_dir()
            .join(format!("{}.{XML_EXT}", file_name_legal(name)))
    }

    pub fn playlist_doc_path(&self, name: &str) -> PathBuf {
        self.playlists_dir()
            .join(format!("{}.{XML_EXT}", file_name_legal(name)))
    }

    /// `Images/<platform>/Box - Front`
    pub fn logo_dir(&self, platform: &str) -> PathBuf {
        self.platform_images_dir(platform).join(LOGO_FOLDER)
    }

    /// `Images/<platform>/Screenshot - Gameplay`
    pub fn screenshot_dir(&self, platform: &str) -> PathBuf {
        self.platform_images_dir(platform).join(SCREENSHOT_FOLDER)
    }

    /// The `FolderPath` that `Platforms.xml` records for one of a platform's
    /// media folders. LaunchBox stores these relative to its root with
    /// Windows separators.
    pub fn media_folder_setting(platform: &str, folder: &str) -> String {
        format!("{IMAGES_PATH}\\{}\\{folder}", file_name_legal(platform))
    }

    fn platform_images_dir(&self, platform: &str) -> PathBuf {
        self.root.join(IMAGES_PATH).join(file_name_legal(platform))
    }

    /// Names of the platform documents already present.
    pub fn existing_platforms(&self) -> io::Result<BTreeSet<String>> {
        list_document_stems(&self.platforms_dir())
    }

    /// Names of the playlist documents already present.
    pub fn existing_playlists(&self) -> io::Result<BTreeSet<String>> {
        list_document_stems(&self.playlists_dir())
    }

    // ── Documents ───────────────────────────────────────────────────────────

    pub fn open_platform_doc(
        &mut self,
        name: &str,
        options: UpdateOptions,
    ) -> Result<PlatformDoc, LaunchBoxError> {
        let handle = DocumentHandle::new(DocKind::Platform, name);
        let path = self.platform_doc_path(name);
        self.open_document(handle, path, |file| PlatformDoc::new(file, options))
    }

    pub fn open_playlist_doc(
        &mut self,
        name: &str,
        options: UpdateOptions,
    ) -> Result<PlaylistDoc, LaunchBoxError> {
        let handle = DocumentHandle::new(DocKind::Playlist, name);
        let path = self.playlist_doc_path(name);
        self.open_document(handle, path, |file| PlaylistDoc::new(file, options))
    }

    pub fn open_platform_config_doc(&mut self) -> Result<PlatformConfigDoc, LaunchBoxError> {
        let handle = DocumentHandle::new(DocKind::PlatformConfig, PLATFORM_CONFIG_NAME);
        let path = self.platform_config_path();
        self.open_document(handle, path, PlatformConfigDoc::new)
    }

    pub fn is_leased(&self, handle: &DocumentHandle) -> bool {
        self.leased.contains_key(handle)
    }

    fn open_document<D: Document>(
        &mut self,
        handle: DocumentHandle,
        path: PathBuf,
        make: impl FnOnce(DocFile) -> D,
    ) -> Result<D, LaunchBoxError> {
        // Names that sanitize to the same file share one lease.
        if self.leased.contains_key(&handle) || self.leased.values().any(|p| *p == path) {
            return Err(LaunchBoxError::AlreadyLeased(handle));
        }

        let io_err = |path: &Path, e: io::Error| LaunchBoxError::io(&handle, path, e);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }

        // A path this batch already wrote keeps its first backup and journal
        // entry; the document is loaded from what the batch wrote.
        let journaled = self.journal.document_paths().any(|p| p == path);
        let backup = backup_path(&path);
        let existed = path.exists();
        // Ids from an earlier save of this path are either loaded again below
        // or belong to content that was reverted.
        for id in self.held_ids.remove(&path).unwrap_or_default() {
            self.tracker.release(id);
        }
        let text = if journaled {
            if existed {
                Some(fs::read_to_string(&path).map_err(|e| io_err(&path, e))?)
            } else {
                None
            }
        } else {
            if backup.exists() {
                if !existed {
                    log::warn!("Removing stale backup {}", backup.display());
                }
                fs::remove_file(&backup).map_err(|e| io_err(&backup, e))?;
            }
            if existed {
                fs::rename(&path, &backup).map_err(|e| io_err(&path, e))?;
            }
            self.journal
                .push(RevertEntry::PendingDocumentWrite(path.clone()));
            if existed {
                Some(fs::read_to_string(&backup).map_err(|e| io_err(&backup, e))?)
            } else {
                None
            }
        };

        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| io_err(&path, e))?;

        let mut doc = make(DocFile {
            handle: handle.clone(),
            path: path.clone(),
            file,
        });

        if let Some(text) = text {
            let mut reader = DocReader::new(&text, &handle);
            if reader.read_root()? {
                doc.read_body(&mut reader, &mut self.tracker)?;
            }
        }

        log::debug!("Opened {handle}");
        self.leased.insert(handle, path);
        Ok(doc)
    }

    /// Write a document's final records and release its lease.
    ///
    /// The lease is released even when writing fails; the journal entry made
    /// at open time stays so the document can still be reverted.
    pub fn save_document<D: Document>(&mut self, mut doc: D) -> Result<(), LaunchBoxError> {
        let mut writer = DocWriter::new();
        doc.write_body(&mut writer);
        let text = writer.finish();

        let handle = doc.handle().clone();
        let path = doc.path().to_path_buf();
        let held = doc.held_ids();
        let written = write_all(&mut doc.file_mut().file, text.as_bytes());
        drop(doc);
        self.leased.remove(&handle);
        if !held.is_empty() {
            self.held_ids.insert(path.clone(), held);
        }

        written.map_err(|e| LaunchBoxError::io(&handle, &path, e))?;
        self.permissions
            .grant_user_writable(&path)
            .map_err(|e| LaunchBoxError::io(&handle, &path, e))?;
        log::debug!("Saved {handle}");
        Ok(())
    }

    /// Release a document's lease without writing it.
    ///
    /// The file stays as it was opened (empty) and its journal entry remains,
    /// so reverting still restores the original.
    pub fn discard_document<D: Document>(&mut self, doc: D) {
        let handle = doc.handle().clone();
        drop(doc);
        self.leased.remove(&handle);
        log::debug!("Discarded {handle}");
    }

    // ── Images ──────────────────────────────────────────────────────────────

    /// Place image `src` at `dst` using `mode`.
    pub fn transfer_image(
        &mut self,
        mode: ImageMode,
        src: &Path,
        dst: &Path,
    ) -> Result<TransferOutcome, ImageTransferError> {
        image::transfer_image(&mut self.journal, mode, src, dst)
    }

    // ── Allocator & Journal ─────────────────────────────────────────────────

    pub fn id_tracker(&self) -> &FreeIndexTracker {
        &self.tracker
    }

    pub fn id_tracker_mut(&mut self) -> &mut FreeIndexTracker {
        &mut self.tracker
    }

    /// Number of changes that can still be reverted.
    pub fn revert_queue_len(&self) -> usize {
        self.journal.len()
    }

    /// Undo the next journaled change and return how many remain.
    ///
    /// Without `skip_on_fail` a failing change stays queued and is reported;
    /// with it, the change is attempted as far as possible, consumed, and any
    /// failure is still reported.
    pub fn revert_next_change(&mut self, skip_on_fail: bool) -> Result<usize, RevertError> {
        self.journal.revert_next(skip_on_fail)
    }

    /// Undo every journaled change, best-effort, returning what failed.
    pub fn revert_all_changes(&mut self) -> Vec<RevertError> {
        let mut errors = Vec::new();
        while !self.journal.is_empty() {
            if let Err(e) = self.journal.revert_next(true) {
                errors.push(e);
            }
        }
        errors
    }

    /// Keep every change: delete the document backups and reset.
    pub fn confirm_all_changes(&mut self) {
        for path in self.journal.document_paths() {
            let backup = backup_path(path);
            if backup.exists() {
                if let Err(e) = fs::remove_file(&backup) {
                    log::warn!("Could not delete backup {}: {e}", backup.display());
                }
            }
        }
        self.reset();
    }

    /// Forget the journal and start the allocator over.
    pub fn reset(&mut self) {
        self.journal.clear();
        self.held_ids.clear();
        self.tracker.reset(0);
    }
}

fn write_all(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(bytes)?;
    file.flush()
}

fn list_document_stems(dir: &Path) -> io::Result<BTreeSet<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(e),
    };
    let mut stems = BTreeSet::new();
    for entry in entries {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(XML_EXT));
        if path.is_file() && is_xml {
            if let Some(stem) = path.file_stem() {
                stems.insert(stem.to_string_lossy().into_owned());
            }
        }
    }
    Ok(stems)
}

#[cfg(test)]
#[path = "tests/install_tests.rs"]
mod tests;
