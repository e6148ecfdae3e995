use std::fs;
use std::io;
use std::path::Path;

/// Makes a freshly written file editable by the end user.
///
/// LaunchBox must be able to rewrite every document the importer produces, so
/// the transaction manager calls this after each save.
pub trait UserPermissions {
    fn grant_user_writable(&self, path: &Path) -> io::Result<()>;
}

/// Adds the owner-write bit (or clears read-only off unix).
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerWritable;

impl UserPermissions for OwnerWritable {
    fn grant_user_writable(&self, path: &Path) -> io::Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            permissions.set_mode(permissions.mode() | 0o200);
        }
        #[cfg(not(unix))]
        permissions.set_readonly(false);

        fs::set_permissions(path, permissions)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn adds_owner_write_bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.xml");
        fs::write(&path, "x").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

        OwnerWritable.grant_user_writable(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
