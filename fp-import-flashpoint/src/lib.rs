//! Read-only access to a Flashpoint install.
//!
//! Provides the schema check, the game/playlist queries the importer is built
//! on, and the location of Flashpoint's database and image trees. The
//! database is never written to.

pub mod error;
pub mod install;
pub mod queries;
pub mod schema;
pub mod types;

pub use error::FlashpointError;
pub use install::FlashpointInstall;
pub use queries::{FlashpointDb, QueryBuffer};
pub use schema::{REQUIRED_TABLES, SchemaReport, TableSpec};
pub use types::{
    ADD_APP_EXTRAS, ADD_APP_MESSAGE, FpAddApp, FpGame, FpPlaylist, FpPlaylistGame, GAME_LIBRARY,
};
