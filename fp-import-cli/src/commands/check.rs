use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use fp_import_flashpoint::FlashpointInstall;

use crate::error::CliError;

/// Report whether the Flashpoint database has everything the importer reads.
pub(crate) fn run_check(flashpoint: &FlashpointInstall) -> Result<(), CliError> {
    let db = flashpoint.open_database()?;
    let report = db.check_schema()?;

    log::info!(
        "Database: {}",
        flashpoint
            .database_path()
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );

    if report.is_compatible() {
        log::info!(
            "{} Schema is compatible",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    for table in &report.missing_tables {
        log::warn!(
            "{} Missing table: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            table,
        );
    }
    for column in &report.missing_columns {
        log::warn!(
            "{} Missing column: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            column,
        );
    }
    report.into_result()?;
    Ok(())
}
