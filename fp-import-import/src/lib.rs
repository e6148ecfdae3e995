//! Import Flashpoint platforms and playlists into a LaunchBox install.
//!
//! This crate owns the import run itself: converting Flashpoint rows into
//! LaunchBox records, driving the merge of each document, transferring
//! images, and rolling everything back when the run fails or is canceled.

pub mod convert;
pub mod error;
pub mod progress;
pub mod worker;

pub use error::ImportError;
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use worker::{ImportOptions, ImportStats, ImportWorker};
