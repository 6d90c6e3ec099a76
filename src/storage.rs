//! File storage used by every file-touching tool.
//!
//! Resolves tool-supplied paths against the workspace, reads UTF-8 text,
//! and writes through a temp file in the target directory followed by a
//! rename so readers never observe a half-written file.
//!
//! There is no locking between a read and the following write: two edits
//! racing on one path both succeed and the last rename wins.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;

/// Workspace-rooted file access.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    confined: bool,
}

impl FileStore {
    /// Create a store rooted at `root`. When `confined`, paths resolving
    /// outside `root` are rejected.
    pub fn new(root: impl Into<PathBuf>, confined: bool) -> Self {
        Self {
            root: root.into(),
            confined,
        }
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a tool-supplied path.
    ///
    /// Relative paths are joined to the workspace. The existing part of the
    /// path is canonicalized before the workspace check, so neither a
    /// symlinked parent nor `..` through a missing directory can place a new
    /// file outside the workspace.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        if path.is_empty() {
            return Err(StorageError::InvalidPath {
                path: path.to_owned(),
                reason: "path is empty",
            });
        }
        if path.contains('\0') {
            return Err(StorageError::InvalidPath {
                path: path.replace('\0', "\\0"),
                reason: "path contains null byte",
            });
        }

        let raw = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.root.join(path)
        };

        let resolved = canonicalize_lenient(&raw).map_err(|source| StorageError::Io {
            path: raw.clone(),
            source,
        })?;

        if self.confined {
            let root = self
                .root
                .canonicalize()
                .unwrap_or_else(|_| self.root.clone());
            if !resolved.starts_with(&root) {
                return Err(StorageError::OutsideWorkspace {
                    path: path.to_owned(),
                });
            }
        }

        Ok(resolved)
    }

    /// Read the whole file at `path` as UTF-8.
    pub fn read_text(&self, path: &Path) -> Result<String, StorageError> {
        match std::fs::read(path) {
            Ok(bytes) => String::from_utf8(bytes).map_err(|_| StorageError::NotText {
                path: path.to_path_buf(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write `content` to `path`, creating parent directories as needed.
    ///
    /// Returns `true` if the file already existed. Existing permissions are
    /// carried over to the replacement file.
    pub fn write_text(&self, path: &Path, content: &str) -> Result<bool, StorageError> {
        let io_err = |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };

        let parent = path.parent().ok_or_else(|| StorageError::InvalidPath {
            path: path.display().to_string(),
            reason: "path has no parent directory",
        })?;
        std::fs::create_dir_all(parent).map_err(io_err)?;

        let existing = std::fs::metadata(path).ok();

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        if let Some(meta) = &existing {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(io_err)?;
        }
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        debug!(path = %path.display(), bytes = content.len(), "file written");
        Ok(existing.is_some())
    }
}

/// Canonicalize `path`, tolerating components that do not exist yet.
///
/// Existing prefixes go through the OS (symlinks, `..`); once the walk
/// leaves the existing tree, `..` simply pops the last component.
fn canonicalize_lenient(path: &Path) -> std::io::Result<PathBuf> {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir if !resolved.exists() => {
                resolved.pop();
                continue;
            }
            other => resolved.push(other),
        }
        if resolved.exists() {
            resolved = resolved.canonicalize()?;
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path(), true)
    }

    #[test]
    fn test_relative_path_joins_workspace() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolved = store(&dir).resolve("a/b.txt").expect("resolve");
        let root = dir.path().canonicalize().expect("canonicalize");
        assert_eq!(resolved, root.join("a/b.txt"));
    }

    #[test]
    fn test_escape_rejected_when_confined() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = store(&dir).resolve("../outside.txt").expect_err("should escape");
        assert!(matches!(err, StorageError::OutsideWorkspace { .. }));
    }

    #[test]
    fn test_escape_allowed_when_unconfined() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fs = FileStore::new(dir.path(), false);
        assert!(fs.resolve("../outside.txt").is_ok());
    }

    #[test]
    fn test_parent_dir_through_missing_directory_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = store(&dir)
            .resolve("missing/../../escape.txt")
            .expect_err("should escape");
        assert!(matches!(err, StorageError::OutsideWorkspace { .. }));
    }

    #[test]
    fn test_null_byte_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = store(&dir).resolve("a\0b").expect_err("null byte");
        assert!(matches!(err, StorageError::InvalidPath { .. }));
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fs = store(&dir);
        let path = fs.resolve("missing.txt").expect("resolve");
        let err = fs.read_text(&path).expect_err("missing");
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_write_creates_parents_and_reports_existence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fs = store(&dir);
        let path = fs.resolve("nested/deeper/file.txt").expect("resolve");
        assert!(!fs.write_text(&path, "one").expect("first write"));
        assert!(fs.write_text(&path, "two").expect("second write"));
        assert_eq!(fs.read_text(&path).expect("read"), "two");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let fs = store(&dir);
        let path = fs.resolve("script.sh").expect("resolve");
        std::fs::write(&path, "#!/bin/sh\n").expect("seed");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");

        fs.write_text(&path, "#!/bin/sh\necho hi\n").expect("write");
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
