/// Errors raised while reading a Flashpoint install.
#[derive(Debug, thiserror::Error)]
pub enum FlashpointError {
    /// The database reported an error; the message is passed through verbatim.
    #[error("Flashpoint database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(
        "Flashpoint database does not match the expected schema (missing tables: [{}], missing columns: [{}])",
        .missing_tables.join(", "),
        .missing_columns.join(", ")
    )]
    SchemaMismatch {
        missing_tables: Vec<String>,
        missing_columns: Vec<String>,
    },
}
