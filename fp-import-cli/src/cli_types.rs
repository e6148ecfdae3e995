//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use fp_import_launchbox::{ImageMode, ImportMode};

#[derive(Parser)]
#[command(name = "fp-import")]
#[command(about = "Import Flashpoint games and playlists into LaunchBox", long_about = None)]
pub(crate) struct Cli {
    /// LaunchBox install directory (overrides the saved setting)
    #[arg(long, global = true)]
    pub launchbox: Option<PathBuf>,

    /// Flashpoint install directory (overrides the saved setting)
    #[arg(long, global = true)]
    pub flashpoint: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check that the Flashpoint database has the expected tables and columns
    Check,

    /// List the platforms and playlists available in Flashpoint
    List,

    /// Import platforms and playlists into LaunchBox
    Import(ImportArgs),

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone)]
pub(crate) struct ImportArgs {
    /// Platforms to import (e.g., Flash,HTML5), or "all"
    #[arg(short, long, value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// Playlist titles to import, or "all"
    #[arg(long, value_delimiter = ',')]
    pub playlists: Vec<String>,

    /// How to treat games that already exist in LaunchBox
    #[arg(long)]
    pub mode: Option<ModeArg>,

    /// Remove LaunchBox entries of an imported document that this import did not touch
    #[arg(long, overrides_with = "no_remove_obsolete")]
    pub remove_obsolete: bool,

    /// Keep untouched LaunchBox entries even when the saved default removes them
    #[arg(long, overrides_with = "remove_obsolete")]
    pub no_remove_obsolete: bool,

    /// How images reach LaunchBox
    #[arg(long)]
    pub images: Option<ImagesArg>,

    /// Include games flagged as extreme
    #[arg(long)]
    pub include_extreme: bool,

    /// Stop and roll back when an image cannot be transferred
    #[arg(long)]
    pub abort_on_image_error: bool,

    /// Launcher path written into every game (default: the Flashpoint launcher)
    #[arg(long)]
    pub launcher: Option<String>,

    /// Import games from every Flashpoint library, not just the game library
    #[arg(long)]
    pub all_libraries: bool,

    /// Do not ask before altering existing LaunchBox documents
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the saved settings
    Show,

    /// Print the settings file path
    Path,

    /// Save the install directories given with --launchbox / --flashpoint
    SetPaths,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ModeArg {
    /// Only add games LaunchBox does not have yet
    NewOnly,
    /// Add new games and overwrite existing ones
    #[default]
    NewAndExisting,
}

impl From<ModeArg> for ImportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::NewOnly => ImportMode::NewOnly,
            ModeArg::NewAndExisting => ImportMode::NewAndExisting,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ImagesArg {
    /// Copy images into LaunchBox
    #[default]
    Copy,
    /// Symlink LaunchBox images to Flashpoint's
    Link,
    /// Move images into LaunchBox and leave symlinks in Flashpoint
    Relocate,
}

impl From<ImagesArg> for ImageMode {
    fn from(images: ImagesArg) -> Self {
        match images {
            ImagesArg::Copy => ImageMode::Copy,
            ImagesArg::Link => ImageMode::Link,
            ImagesArg::Relocate => ImageMode::RelocateAndLinkBack,
        }
    }
}
