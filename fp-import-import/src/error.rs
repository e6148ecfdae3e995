use fp_import_flashpoint::FlashpointError;
use fp_import_launchbox::{ImageTransferError, LaunchBoxError, RevertError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Flashpoint(#[from] FlashpointError),

    #[error(transparent)]
    LaunchBox(#[from] LaunchBoxError),

    #[error(transparent)]
    Image(#[from] ImageTransferError),

    #[error("No platforms or playlists were selected")]
    NothingSelected,

    #[error("Import canceled")]
    Canceled,

    /// The import failed and rolling it back failed too.
    #[error("{cause} ({} change(s) could not be reverted)", failures.len())]
    RevertIncomplete {
        cause: Box<ImportError>,
        failures: Vec<RevertError>,
    },
}
