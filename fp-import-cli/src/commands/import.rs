use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use fp_import_core::file_name_legal;
use fp_import_flashpoint::FlashpointInstall;
use fp_import_import::{ImportOptions, ImportStats, ImportWorker};
use fp_import_launchbox::{Install, UpdateOptions};

use crate::cli_types::ImportArgs;
use crate::error::CliError;
use crate::progress::BarProgress;
use crate::settings::ImportDefaults;

/// Expand a selection that may be the single word "all".
fn expand_selection(selected: Vec<String>, available: &[String]) -> Vec<String> {
    if selected.len() == 1 && selected[0].eq_ignore_ascii_case("all") {
        return available.to_vec();
    }
    for name in &selected {
        if !available.contains(name) {
            log::warn!("'{}' is not in the Flashpoint database", name);
        }
    }
    selected
}

/// Build import options from arguments, falling back to saved defaults.
fn import_options(
    args: ImportArgs,
    defaults: &ImportDefaults,
    platforms: Vec<String>,
    playlists: BTreeSet<String>,
) -> ImportOptions {
    let mut options = ImportOptions {
        platforms,
        playlists,
        update: UpdateOptions {
            import_mode: args.mode.unwrap_or(defaults.mode).into(),
            remove_obsolete: match (args.remove_obsolete, args.no_remove_obsolete) {
                (true, _) => true,
                (_, true) => false,
                _ => defaults.remove_obsolete,
            },
        },
        image_mode: args.images.unwrap_or(defaults.images).into(),
        launcher_path: args.launcher,
        include_extreme: args.include_extreme,
        abort_on_image_error: args.abort_on_image_error,
        ..Default::default()
    };
    if args.all_libraries {
        options.library = None;
    }
    options
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Import the selected platforms and playlists.
pub(crate) fn run_import(
    flashpoint: &FlashpointInstall,
    launchbox: &mut Install,
    args: ImportArgs,
    defaults: &ImportDefaults,
    quiet: bool,
) -> Result<(), CliError> {
    let db = flashpoint.open_database()?;
    db.require_schema()?;

    let platforms = expand_selection(args.platforms.clone(), &db.platform_list()?);
    let playlists: BTreeSet<String> =
        expand_selection(args.playlists.clone(), &db.playlist_list()?)
            .into_iter()
            .collect();

    let existing_platforms = launchbox.existing_platforms()?;
    let existing_playlists = launchbox.existing_playlists()?;
    let altered: Vec<&String> = platforms
        .iter()
        .filter(|p| existing_platforms.contains(&file_name_legal(p)))
        .chain(
            playlists
                .iter()
                .filter(|p| existing_playlists.contains(&file_name_legal(p))),
        )
        .collect();
    if !altered.is_empty() {
        log::warn!("These LaunchBox documents already exist and will be modified:");
        for name in &altered {
            log::warn!("  {}", name);
        }
        if !args.yes && !confirm("Continue?")? {
            return Err(CliError::Aborted);
        }
    }

    let options = import_options(args, defaults, platforms, playlists);
    let progress = BarProgress::new(quiet);
    let stats = ImportWorker::new(flashpoint, &db, launchbox, options).run(&progress)?;
    drop(progress);
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &ImportStats) {
    log::info!(
        "{} Import complete",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    log::info!(
        "  Games:          {} added, {} updated, {} kept",
        stats.games_inserted,
        stats.games_updated,
        stats.games_kept,
    );
    if stats.games_filtered > 0 {
        log::info!("  Extreme games skipped: {}", stats.games_filtered);
    }
    log::info!("  Additional apps: {}", stats.add_apps);
    log::info!(
        "  Playlist games:  {} ({} not imported)",
        stats.playlist_games,
        stats.playlist_games_missing,
    );
    if stats.obsolete_removed > 0 {
        log::info!("  Obsolete entries removed: {}", stats.obsolete_removed);
    }
    log::info!(
        "  Images:          {} transferred, {} already present",
        stats.images_transferred,
        stats.images_skipped,
    );
    if !stats.image_warnings.is_empty() {
        log::warn!(
            "  {} image(s) could not be transferred",
            stats.image_warnings.len().if_supports_color(Stdout, |t| t.yellow()),
        );
    }
}
