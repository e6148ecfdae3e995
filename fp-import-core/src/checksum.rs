//! Content checksums for deciding whether two files already hold the same bytes.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

/// SHA-256 of a file's contents as lowercase hex.
///
/// Symbolic links are followed.
pub fn file_checksum(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}

/// Whether both files exist and have identical contents.
pub fn files_match(a: &Path, b: &Path) -> io::Result<bool> {
    let len_a = std::fs::metadata(a)?.len();
    let len_b = std::fs::metadata(b)?.len();
    if len_a != len_b {
        return Ok(false);
    }
    Ok(file_checksum(a)? == file_checksum(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_of_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(
            file_checksum(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn matching_and_differing_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        let c = dir.path().join("c.png");
        std::fs::write(&a, b"same bytes").unwrap();
        std::fs::write(&b, b"same bytes").unwrap();
        std::fs::write(&c, b"diff bytes").unwrap();

        assert!(files_match(&a, &b).unwrap());
        assert!(!files_match(&a, &c).unwrap());
        assert!(files_match(&a, &dir.path().join("missing.png")).is_err());
    }
}
