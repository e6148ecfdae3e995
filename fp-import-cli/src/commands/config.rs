use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::settings::{Settings, settings_path};

fn show_root(label: &str, root: Option<&PathBuf>) {
    match root {
        Some(p) => log::info!(
            "  {}: {}",
            label,
            p.display().if_supports_color(Stdout, |t| t.cyan())
        ),
        None => log::info!(
            "  {}: {}",
            label,
            "(not set)".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }
}

/// Show the saved settings.
pub(crate) fn run_config_show(settings: &Settings) {
    let path = settings_path();
    log::info!(
        "{}",
        "fp-import Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            format!("{}", "(exists)".if_supports_color(Stdout, |t| t.green()))
        } else {
            format!("{}", "(not found)".if_supports_color(Stdout, |t| t.dimmed()))
        },
    );
    log::info!("");
    show_root("LaunchBox", settings.launchbox_root.as_ref());
    show_root("Flashpoint", settings.flashpoint_root.as_ref());
    log::info!("  Import mode: {:?}", settings.import.mode);
    log::info!("  Remove obsolete: {}", settings.import.remove_obsolete);
    log::info!("  Images: {:?}", settings.import.images);
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Save the install directories given on the command line.
pub(crate) fn run_config_set_paths(
    mut settings: Settings,
    launchbox: Option<PathBuf>,
    flashpoint: Option<PathBuf>,
) -> Result<(), CliError> {
    if launchbox.is_none() && flashpoint.is_none() {
        return Err(CliError::config(
            "nothing to save; pass --launchbox and/or --flashpoint",
        ));
    }
    if let Some(root) = launchbox {
        settings.launchbox_root = Some(std::path::absolute(root)?);
    }
    if let Some(root) = flashpoint {
        settings.flashpoint_root = Some(std::path::absolute(root)?);
    }
    settings.save()?;
    log::info!(
        "{} Saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        settings_path().display(),
    );
    Ok(())
}
