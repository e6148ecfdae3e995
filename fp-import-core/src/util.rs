use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension appended to a file's full name while it is set aside.
pub const BACKUP_SUFFIX: &str = ".bak";

/// The backup location for `path`: the same directory, with `.bak` appended
/// to the full file name (`Arcade.xml` → `Arcade.xml.bak`).
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Replace characters that cannot appear in a Windows file name.
///
/// Platform and playlist names become document file names, and LaunchBox
/// installs are usually on Windows, so the stricter rule set is applied
/// everywhere.
pub fn file_name_legal(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    // Trailing dots and spaces are silently stripped by Windows.
    cleaned.trim_end_matches(['.', ' ']).to_string()
}
