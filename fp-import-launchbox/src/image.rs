//! Placing Flashpoint images into the LaunchBox image tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fp_import_core::{backup_path, files_match};

use crate::error::ImageTransferError;
use crate::journal::{RevertEntry, RevertJournal};

/// How an image reaches its LaunchBox location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageMode {
    /// Duplicate the bytes.
    #[default]
    Copy,
    /// Symlink the LaunchBox location to the Flashpoint image.
    Link,
    /// Move the image into LaunchBox and leave a symlink behind in Flashpoint.
    RelocateAndLinkBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Transferred,
    /// The destination already held this image.
    Skipped,
}

/// Transfer `src` to `dst`, journaling what can be undone.
///
/// An occupied destination is moved aside to its backup first and restored if
/// the transfer fails. When the transfer succeeds the backup is deleted, so
/// there is nothing to journal for the overwritten image itself.
pub(crate) fn transfer_image(
    journal: &mut RevertJournal,
    mode: ImageMode,
    src: &Path,
    dst: &Path,
) -> Result<TransferOutcome, ImageTransferError> {
    let occupied = dst.symlink_metadata().is_ok();

    if occupied && src.exists() {
        let dst_is_link = dst.is_symlink();
        if mode == ImageMode::Link && dst_is_link {
            return Ok(TransferOutcome::Skipped);
        }
        match files_match(src, dst) {
            Ok(true) => return Ok(TransferOutcome::Skipped),
            Ok(false) => {}
            Err(e) => log::warn!(
                "Could not compare {} with {}, replacing it: {e}",
                src.display(),
                dst.display()
            ),
        }
    }

    let backup = if occupied {
        let backup = backup_path(dst);
        let moved = remove_if_present(&backup).and_then(|()| fs::rename(dst, &backup));
        if let Err(e) = moved {
            return Err(ImageTransferError::WontBackup {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
                message: e.to_string(),
            });
        }
        Some(backup)
    } else {
        None
    };

    if let Err(e) = perform(mode, src, dst) {
        if let Some(backup) = &backup {
            let restored = remove_if_present(dst).and_then(|()| fs::rename(backup, dst));
            if let Err(restore_err) = restored {
                log::warn!(
                    "Could not restore {} from {}: {restore_err}",
                    dst.display(),
                    backup.display()
                );
            }
        }
        let (src, dst, message) = (src.to_path_buf(), dst.to_path_buf(), e.to_string());
        return Err(match mode {
            ImageMode::Copy => ImageTransferError::WontCopy { src, dst, message },
            ImageMode::Link => ImageTransferError::WontLink { src, dst, message },
            ImageMode::RelocateAndLinkBack => ImageTransferError::WontMove { src, dst, message },
        });
    }

    match mode {
        // The Flashpoint side changed; that must be undone whether or not
        // the destination was overwritten.
        ImageMode::RelocateAndLinkBack => journal.push(RevertEntry::ReversibleLink {
            original: src.to_path_buf(),
            created: dst.to_path_buf(),
        }),
        ImageMode::Copy | ImageMode::Link if backup.is_none() => {
            journal.push(RevertEntry::PurgeableImage(dst.to_path_buf()));
        }
        ImageMode::Copy | ImageMode::Link => {}
    }

    if let Some(backup) = backup {
        if let Err(e) = fs::remove_file(&backup) {
            log::warn!("Could not delete image backup {}: {e}", backup.display());
        }
    }

    Ok(TransferOutcome::Transferred)
}

fn perform(mode: ImageMode, src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    match mode {
        ImageMode::Copy => fs::copy(src, dst).map(|_| ()),
        ImageMode::Link => {
            if !src.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", src.display()),
                ));
            }
            symlink(&std::path::absolute(src)?, dst)
        }
        ImageMode::RelocateAndLinkBack => relocate_and_link_back(src, dst),
    }
}

fn relocate_and_link_back(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::rename(src, dst).is_err() {
        // Different filesystems.
        fs::copy(src, dst)?;
        if let Err(e) = fs::remove_file(src) {
            if let Err(cleanup) = fs::remove_file(dst) {
                log::debug!("Could not remove copy {}: {cleanup}", dst.display());
            }
            return Err(e);
        }
    }

    let target: PathBuf = std::path::absolute(dst)?;
    if let Err(e) = symlink(&target, src) {
        if let Err(undo) = fs::rename(dst, src) {
            log::warn!("Could not move {} back to {}: {undo}", dst.display(), src.display());
        }
        return Err(e);
    }
    Ok(())
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(test)]
#[path = "tests/image_tests.rs"]
mod tests;
