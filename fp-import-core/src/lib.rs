//! Shared building blocks for the Flashpoint → LaunchBox importer.
//!
//! Everything here is independent of either application's storage format:
//! the free-id allocator used for playlist entries, content checksums used to
//! decide whether an image needs transferring, and small path helpers.

pub mod checksum;
pub mod tracker;
pub mod util;

pub use checksum::{file_checksum, files_match};
pub use tracker::FreeIndexTracker;
pub use util::{backup_path, file_name_legal};
