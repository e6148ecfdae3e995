//! On-disk layout of a Flashpoint install.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::FlashpointError;
use crate::queries::FlashpointDb;

pub const DATABASE_PATH: &str = "Data/flashpoint.sqlite";
pub const LOGOS_PATH: &str = "Data/Images/Logos";
pub const SCREENSHOTS_PATH: &str = "Data/Images/Screenshots";
pub const IMAGE_EXT: &str = "png";
/// The command line launcher that starts a game by id.
pub const LAUNCHER_PATH: &str = "CLIFp.exe";

/// Paths within a Flashpoint install rooted at some directory.
#[derive(Debug, Clone)]
pub struct FlashpointInstall {
    root: PathBuf,
}

impl FlashpointInstall {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_PATH)
    }

    pub fn logos_dir(&self) -> PathBuf {
        self.root.join(LOGOS_PATH)
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.root.join(SCREENSHOTS_PATH)
    }

    pub fn launcher_path(&self) -> PathBuf {
        self.root.join(LAUNCHER_PATH)
    }

    /// Open the install's database read-only.
    pub fn open_database(&self) -> Result<FlashpointDb, FlashpointError> {
        FlashpointDb::open(&self.database_path())
    }

    /// Where the logo of game `id` is stored.
    pub fn logo_path(&self, id: &Uuid) -> PathBuf {
        image_path(&self.logos_dir(), id)
    }

    /// Where the screenshot of game `id` is stored.
    pub fn screenshot_path(&self, id: &Uuid) -> PathBuf {
        image_path(&self.screenshots_dir(), id)
    }
}

/// Flashpoint shards images by the first two pairs of hex digits of the
/// game id: `<dir>/ab/cd/abcd….png`.
pub fn image_path(dir: &Path, id: &Uuid) -> PathBuf {
    let id = id.to_string();
    dir.join(&id[0..2])
        .join(&id[2..4])
        .join(format!("{id}.{IMAGE_EXT}"))
}
