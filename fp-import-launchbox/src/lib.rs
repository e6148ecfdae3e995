//! LaunchBox side of the importer.
//!
//! Holds the record kinds LaunchBox stores in its XML data documents, the
//! documents themselves with the merge policy that reconciles existing and
//! incoming records, the XML codec, and [`Install`], the transaction manager
//! through which every document write and image transfer goes so that a
//! failed import can be rolled back.

pub mod doc;
pub mod error;
pub mod image;
pub mod install;
pub mod journal;
pub mod perms;
pub mod records;
mod xml;

pub use doc::{
    DocKind, Document, DocumentHandle, ImportMode, MergeOutcome, PlatformConfigDoc, PlatformDoc,
    PlaylistDoc, UpdateOptions,
};
pub use error::{ImageTransferError, LaunchBoxError, RevertError};
pub use image::{ImageMode, TransferOutcome};
pub use install::Install;
pub use journal::{RevertEntry, RevertJournal};
pub use perms::{OwnerWritable, UserPermissions};
pub use records::{
    AddApp, AddAppBuilder, Game, GameBuilder, OtherFields, Platform, PlatformCategory,
    PlaylistGame, PlaylistGameBuilder, PlaylistHeader, PlaylistHeaderBuilder, parse_date,
};
pub use xml::RawElement;
