//! Ordered record of the filesystem changes made during a batch.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fp_import_core::backup_path;

use crate::error::RevertError;

/// One reversible change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertEntry {
    /// A document was (re)created; its previous content, if any, sits in the
    /// colocated backup.
    PendingDocumentWrite(PathBuf),
    /// An image was placed where nothing was before.
    PurgeableImage(PathBuf),
    /// A file was moved from `original` to `created` and `original` was
    /// replaced with a link to it.
    ReversibleLink { original: PathBuf, created: PathBuf },
}

impl RevertEntry {
    /// Undo this change.
    ///
    /// With `skip_on_fail` every step is attempted and the first failure is
    /// reported afterwards; otherwise the first failure stops the revert.
    pub fn revert(&self, skip_on_fail: bool) -> Result<(), RevertError> {
        let mut first_error = None;
        let mut step = |result: Result<(), RevertError>| -> Result<(), RevertError> {
            match result {
                Ok(()) => Ok(()),
                Err(e) if skip_on_fail => {
                    log::warn!("{e}");
                    first_error.get_or_insert(e);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        };

        match self {
            RevertEntry::PendingDocumentWrite(path) => {
                step(remove_if_present(path))?;
                let backup = backup_path(path);
                if backup.exists() {
                    step(fs::rename(&backup, path).map_err(|e| RevertError::new(&backup, e)))?;
                }
            }
            RevertEntry::PurgeableImage(path) => {
                step(remove_if_present(path))?;
            }
            RevertEntry::ReversibleLink { original, created } => {
                step(remove_if_present(original))?;
                step(fs::rename(created, original).map_err(|e| RevertError::new(created, e)))?;
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn remove_if_present(path: &Path) -> Result<(), RevertError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RevertError::new(path, e)),
    }
}

/// Pending reverts, one queue per category.
///
/// Categories are consumed in a fixed priority order (documents, then images,
/// then links), each oldest-first.
#[derive(Debug, Default)]
pub struct RevertJournal {
    documents: VecDeque<RevertEntry>,
    images: VecDeque<RevertEntry>,
    links: VecDeque<RevertEntry>,
}

impl RevertJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RevertEntry) {
        match entry {
            RevertEntry::PendingDocumentWrite(_) => self.documents.push_back(entry),
            RevertEntry::PurgeableImage(_) => self.images.push_back(entry),
            RevertEntry::ReversibleLink { .. } => self.links.push_back(entry),
        }
    }

    fn next_queue(&mut self) -> Option<&mut VecDeque<RevertEntry>> {
        [&mut self.documents, &mut self.images, &mut self.links]
            .into_iter()
            .find(|queue| !queue.is_empty())
    }

    /// The entry the next revert will consume.
    pub fn peek(&self) -> Option<&RevertEntry> {
        self.documents
            .front()
            .or_else(|| self.images.front())
            .or_else(|| self.links.front())
    }

    /// Revert the next entry. On success, or when `skip_on_fail` is set, the
    /// entry is consumed; otherwise it stays queued.
    pub fn revert_next(&mut self, skip_on_fail: bool) -> Result<usize, RevertError> {
        let Some(queue) = self.next_queue() else {
            return Ok(0);
        };
        let Some(entry) = queue.front() else {
            return Ok(self.len());
        };
        let result = entry.revert(skip_on_fail);
        if result.is_ok() || skip_on_fail {
            queue.pop_front();
        }
        result.map(|()| self.len())
    }

    /// Paths of every journaled document, oldest first.
    pub fn document_paths(&self) -> impl Iterator<Item = &Path> {
        self.documents.iter().filter_map(|entry| match entry {
            RevertEntry::PendingDocumentWrite(path) => Some(path.as_path()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len() + self.images.len() + self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.documents.clear();
        self.images.clear();
        self.links.clear();
    }
}
