//! Saved settings: install locations and import defaults.
//!
//! Stored as `~/.config/fp-import/settings.toml`. A missing file means
//! defaults; an unreadable one is reported and also falls back to defaults.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli_types::{ImagesArg, ModeArg};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub launchbox_root: Option<PathBuf>,
    pub flashpoint_root: Option<PathBuf>,
    pub import: ImportDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ImportDefaults {
    pub mode: ModeArg,
    pub remove_obsolete: bool,
    pub images: ImagesArg,
}

/// Canonical path to the settings file: `~/.config/fp-import/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("fp-import").join("settings.toml")
}

impl Settings {
    pub(crate) fn load() -> Self {
        Self::load_from(&settings_path())
    }

    pub(crate) fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub(crate) fn save(&self) -> io::Result<()> {
        self.save_to(&settings_path())
    }

    /// Write atomically: temp file, then rename over the old one.
    pub(crate) fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(io::Error::other)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Command-line directory first, then the saved one.
    pub(crate) fn launchbox_root(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| self.launchbox_root.clone())
    }

    pub(crate) fn flashpoint_root(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| self.flashpoint_root.clone())
    }
}
