use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Flashpoint(#[from] fp_import_flashpoint::FlashpointError),

    #[error(transparent)]
    Import(#[from] fp_import_import::ImportError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// A required install location was not given and is not configured
    #[error("No {0} directory given; pass --{1} or run `fp-import config set-paths`")]
    MissingRoot(&'static str, &'static str),

    /// The user declined to continue
    #[error("Aborted")]
    Aborted,
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
