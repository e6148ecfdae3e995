use std::collections::BTreeSet;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use fp_import_core::file_name_legal;
use fp_import_flashpoint::FlashpointInstall;
use fp_import_launchbox::Install;

use crate::error::CliError;

/// List Flashpoint platforms and playlists, marking the ones that already
/// have a LaunchBox document an import would alter.
pub(crate) fn run_list(
    flashpoint: &FlashpointInstall,
    launchbox: Option<&Install>,
) -> Result<(), CliError> {
    let db = flashpoint.open_database()?;
    db.require_schema()?;

    let (existing_platforms, existing_playlists) = match launchbox {
        Some(install) => (install.existing_platforms()?, install.existing_playlists()?),
        None => (BTreeSet::new(), BTreeSet::new()),
    };

    print_section("Platforms", &db.platform_list()?, &existing_platforms);
    log::info!("");
    print_section("Playlists", &db.playlist_list()?, &existing_playlists);
    Ok(())
}

fn print_section(heading: &str, names: &[String], existing: &BTreeSet<String>) {
    log::info!(
        "{} ({}):",
        heading.if_supports_color(Stdout, |t| t.bold()),
        names.len()
    );
    for name in names {
        if existing.contains(&file_name_legal(name)) {
            log::info!(
                "  {} {}",
                name,
                "(in LaunchBox)".if_supports_color(Stdout, |t| t.yellow()),
            );
        } else {
            log::info!("  {}", name);
        }
    }
}
