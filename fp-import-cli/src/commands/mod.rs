pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod list;

use std::path::PathBuf;

use fp_import_flashpoint::FlashpointInstall;

use crate::error::CliError;
use crate::settings::Settings;

/// Resolve the Flashpoint install from the command line or settings.
pub(crate) fn flashpoint_install(
    settings: &Settings,
    cli: Option<PathBuf>,
) -> Result<FlashpointInstall, CliError> {
    settings
        .flashpoint_root(cli)
        .map(FlashpointInstall::new)
        .ok_or(CliError::MissingRoot("Flashpoint", "flashpoint"))
}

/// Resolve the LaunchBox root from the command line or settings.
pub(crate) fn launchbox_root(
    settings: &Settings,
    cli: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    settings
        .launchbox_root(cli)
        .ok_or(CliError::MissingRoot("LaunchBox", "launchbox"))
}
