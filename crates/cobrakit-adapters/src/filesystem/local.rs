//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use cobrakit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CoreError, CoreResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> CoreResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> CoreResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> CoreResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CoreError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_truncates_and_read_returns_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LICENSE");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "a much longer first version").unwrap();
        fs.write_file(&path, "short").unwrap();

        assert_eq!(fs.read_file(&path).unwrap(), b"short");
        assert!(fs.is_file(&path));
        assert!(!fs.is_file(dir.path()));
        assert!(fs.exists(dir.path()));
    }

    #[test]
    fn write_does_not_create_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmd").join("root.go");

        let err = LocalFilesystem::new().write_file(&path, "x").unwrap_err();
        assert!(err.to_string().contains("write file"));
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = dir.path().join("app").join("cmd");
        let fs = LocalFilesystem::new();

        fs.create_dir_all(&cmd).unwrap();
        fs.create_dir_all(&cmd).unwrap();
        assert!(cmd.is_dir());
    }
}
