//! fp-import CLI
//!
//! Command-line interface for importing Flashpoint platforms and playlists
//! into a LaunchBox install.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use fp_import_launchbox::Install;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;
use settings::Settings;

/// Plain messages at info level, with the level shown for everything else.
fn init_logging(quiet: bool, verbose: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        })
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load();

    match cli.command {
        Commands::Check => {
            let flashpoint = commands::flashpoint_install(&settings, cli.flashpoint)?;
            commands::check::run_check(&flashpoint)
        }
        Commands::List => {
            let flashpoint = commands::flashpoint_install(&settings, cli.flashpoint)?;
            let launchbox = settings.launchbox_root(cli.launchbox).map(Install::new);
            commands::list::run_list(&flashpoint, launchbox.as_ref())
        }
        Commands::Import(args) => {
            let flashpoint = commands::flashpoint_install(&settings, cli.flashpoint)?;
            let mut launchbox = Install::new(commands::launchbox_root(&settings, cli.launchbox)?);
            commands::import::run_import(
                &flashpoint,
                &mut launchbox,
                args,
                &settings.import,
                cli.quiet,
            )
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&settings);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetPaths => {
                commands::config::run_config_set_paths(settings, cli.launchbox, cli.flashpoint)
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e.if_supports_color(Stderr, |t| t.red()));
        std::process::exit(1);
    }
}
