//! Backup-then-write file replacement.
//!
//! Opening a [`SafeFileWriter`] copies the destination to `<name>.bak`
//! before truncating it. [`SafeFileWriter::commit`] removes the backup.
//! A writer dropped without committing leaves the backup in place.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ReqzError, Result};

/// Scoped writer that keeps a backup of the destination until committed.
pub struct SafeFileWriter {
    path: PathBuf,
    backup: Option<PathBuf>,
    file: Option<BufWriter<File>>,
    committed: bool,
}

impl SafeFileWriter {
    /// Back up `path` (if it exists) and open it for writing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let backup = if path.exists() {
            let backup = Self::backup_path_for(&path);
            fs::copy(&path, &backup).map_err(|source| ReqzError::BackupFailed {
                path: backup.clone(),
                source,
            })?;
            debug!("Backed up {} to {}", path.display(), backup.display());
            Some(backup)
        } else {
            None
        };

        let file = match File::create(&path) {
            Ok(file) => file,
            Err(err) => {
                // Nothing was written, the original is intact.
                if let Some(backup) = &backup {
                    discard_backup(backup);
                }
                return Err(ReqzError::from_io(&path, err));
            }
        };

        Ok(Self {
            path,
            backup,
            file: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    /// Open `path`, run `f`, and commit only if `f` succeeds.
    pub fn write_with<F>(path: impl AsRef<Path>, f: F) -> Result<()>
    where
        F: FnOnce(&mut SafeFileWriter) -> Result<()>,
    {
        let mut writer = Self::open(path)?;
        f(&mut writer)?;
        writer.commit()
    }

    /// The backup location used for `path`.
    pub fn backup_path_for(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        path.with_file_name(name)
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup path, if a backup was made.
    pub fn backup_path(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    /// Flush and close the destination, then delete the backup.
    pub fn commit(mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| ReqzError::from_io(&self.path, e))?;
            file.get_ref()
                .sync_all()
                .map_err(|e| ReqzError::from_io(&self.path, e))?;
        }
        self.committed = true;

        if let Some(backup) = self.backup.take() {
            fs::remove_file(&backup).map_err(|source| ReqzError::BackupRemoveFailed {
                path: backup.clone(),
                source,
            })?;
            debug!("Removed backup {}", backup.display());
        }
        Ok(())
    }
}

/// Remove a backup that is no longer needed, logging a failure.
fn discard_backup(backup: &Path) -> bool {
    match fs::remove_file(backup) {
        Ok(()) => true,
        Err(err) => {
            warn!("Could not remove backup {}: {}", backup.display(), err);
            false
        }
    }
}

impl Write for SafeFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.write(buf),
            None => Err(io::Error::other("writer is closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for SafeFileWriter {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Some(backup) = &self.backup {
            warn!(
                "Write to {} did not complete, backup kept at {}",
                self.path.display(),
                backup.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn backup_path_appends_bak() {
        assert_eq!(
            SafeFileWriter::backup_path_for(Path::new("/tmp/requirements.txt")),
            PathBuf::from("/tmp/requirements.txt.bak")
        );
    }

    #[test]
    fn commit_replaces_content_and_removes_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "old\n").unwrap();

        let mut writer = SafeFileWriter::open(&path).unwrap();
        let backup = writer.backup_path().unwrap().to_path_buf();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "old\n");
        writeln!(writer, "new").unwrap();
        writer.commit().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!backup.exists());
    }

    #[test]
    fn no_backup_when_destination_is_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");

        let mut writer = SafeFileWriter::open(&path).unwrap();
        assert!(writer.backup_path().is_none());
        writer.write_all(b"six > 0\n").unwrap();
        writer.commit().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "six > 0\n");
        assert!(!SafeFileWriter::backup_path_for(&path).exists());
    }

    #[test]
    fn failed_write_keeps_backup_with_original_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "docopt >= 0.6.2\n").unwrap();

        let result = SafeFileWriter::write_with(&path, |w| {
            w.write_all(b"partial")?;
            Err(ReqzError::UserCancelled)
        });

        assert!(matches!(result, Err(ReqzError::UserCancelled)));
        let backup = SafeFileWriter::backup_path_for(&path);
        assert_eq!(fs::read_to_string(backup).unwrap(), "docopt >= 0.6.2\n");
    }

    #[test]
    fn write_with_commits_on_success() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "old\n").unwrap();

        SafeFileWriter::write_with(&path, |w| {
            w.write_all(b"new\n")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!SafeFileWriter::backup_path_for(&path).exists());
    }

    #[test]
    fn dropped_writer_keeps_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "old\n").unwrap();

        {
            let _writer = SafeFileWriter::open(&path).unwrap();
        }

        assert!(SafeFileWriter::backup_path_for(&path).exists());
    }

    #[test]
    fn backup_remove_failure_is_reported_after_write() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "old\n").unwrap();

        let mut writer = SafeFileWriter::open(&path).unwrap();
        let backup = writer.backup_path().unwrap().to_path_buf();
        fs::remove_file(&backup).unwrap();
        writeln!(writer, "new").unwrap();

        let err = writer.commit().unwrap_err();
        match err {
            ReqzError::BackupRemoveFailed { path: failed, .. } => assert_eq!(failed, backup),
            other => panic!("expected BackupRemoveFailed, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn discard_backup_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let backup = temp.path().join("requirements.txt.bak");
        assert!(!discard_backup(&backup));

        fs::write(&backup, "old\n").unwrap();
        assert!(discard_backup(&backup));
        assert!(!backup.exists());
    }

    #[test]
    fn backup_failure_leaves_original_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("not-a-file");
        fs::create_dir(&path).unwrap();

        let result = SafeFileWriter::open(&path);

        assert!(matches!(result, Err(ReqzError::BackupFailed { .. })));
        assert!(path.is_dir());
    }
}
