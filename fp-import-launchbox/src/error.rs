use std::fmt::Display;
use std::path::PathBuf;

use crate::doc::DocumentHandle;

/// Errors that can occur while opening, parsing or saving a LaunchBox document.
#[derive(Debug, thiserror::Error)]
pub enum LaunchBoxError {
    #[error("Error parsing {handle}: {message}")]
    DocumentParse {
        handle: DocumentHandle,
        message: String,
    },

    #[error("The {0} is already open")]
    AlreadyLeased(DocumentHandle),

    #[error("I/O error on {handle} ({}): {message}", path.display())]
    DocumentIo {
        handle: DocumentHandle,
        path: PathBuf,
        message: String,
    },
}

impl LaunchBoxError {
    pub fn parse(handle: &DocumentHandle, msg: impl Into<String>) -> Self {
        Self::DocumentParse {
            handle: handle.clone(),
            message: msg.into(),
        }
    }

    pub fn not_supported(handle: &DocumentHandle) -> Self {
        Self::parse(handle, "not a supported document")
    }

    pub fn io(handle: &DocumentHandle, path: impl Into<PathBuf>, err: impl Display) -> Self {
        Self::DocumentIo {
            handle: handle.clone(),
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// The document the error concerns.
    pub fn handle(&self) -> &DocumentHandle {
        match self {
            Self::DocumentParse { handle, .. }
            | Self::AlreadyLeased(handle)
            | Self::DocumentIo { handle, .. } => handle,
        }
    }
}

/// Why an image could not be placed in the LaunchBox image tree.
#[derive(Debug, thiserror::Error)]
pub enum ImageTransferError {
    #[error("Could not back up existing image {}: {message}", dst.display())]
    WontBackup {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    #[error("Could not copy {} to {}: {message}", src.display(), dst.display())]
    WontCopy {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    #[error("Could not link {} to {}: {message}", dst.display(), src.display())]
    WontLink {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    #[error("Could not move {} to {}: {message}", src.display(), dst.display())]
    WontMove {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },
}

/// A journaled change that could not be undone.
#[derive(Debug, thiserror::Error)]
#[error("Could not revert change to {}: {message}", path.display())]
pub struct RevertError {
    pub path: PathBuf,
    pub message: String,
}

impl RevertError {
    pub fn new(path: impl Into<PathBuf>, err: impl Display) -> Self {
        Self {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
