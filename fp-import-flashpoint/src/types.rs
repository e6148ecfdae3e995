//! Row types read from the Flashpoint database.

use uuid::Uuid;

/// `additional_app.applicationPath` marker for entries that only display a message.
pub const ADD_APP_MESSAGE: &str = ":message:";
/// `additional_app.applicationPath` marker for entries that open an extras folder.
pub const ADD_APP_EXTRAS: &str = ":extras:";
/// `game.library` value of the main game library (as opposed to animations).
pub const GAME_LIBRARY: &str = "arcade";

/// A row of the `game` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpGame {
    pub id: Uuid,
    pub title: String,
    pub series: String,
    pub developer: String,
    pub publisher: String,
    /// Raw date text as stored by Flashpoint.
    pub date_added: String,
    pub date_modified: String,
    pub platform: String,
    pub broken: bool,
    pub extreme: bool,
    pub play_mode: String,
    pub status: String,
    pub notes: String,
    pub source: String,
    pub app_path: String,
    pub launch_command: String,
    pub release_date: String,
    pub version: String,
    pub original_description: String,
    pub language: String,
    pub library: String,
    pub order_title: String,
}

/// A row of the `additional_app` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpAddApp {
    pub id: Uuid,
    pub app_path: String,
    pub auto_run_before: bool,
    pub launch_command: String,
    pub name: String,
    pub wait_for_exit: bool,
    pub parent_game_id: Uuid,
}

impl FpAddApp {
    pub fn is_message(&self) -> bool {
        self.app_path == ADD_APP_MESSAGE
    }

    pub fn is_extras(&self) -> bool {
        self.app_path == ADD_APP_EXTRAS
    }
}

/// A row of the `playlist` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpPlaylist {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
}

/// A row of the `playlist_game` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpPlaylistGame {
    pub id: i64,
    pub playlist_id: Uuid,
    pub order: i32,
    pub game_id: Uuid,
}
