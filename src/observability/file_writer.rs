//! Rotating file writer with size-based rotation and backup retention.
//!
//! [`RotatingFileWriter`] plugs into `tracing_subscriber::fmt` as a
//! [`MakeWriter`]. The fmt layer formats one event into a buffer and hands it
//! over in a single write, so every write is one complete log line and rotation
//! never splits a record.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating log file.
///
/// When the current file exceeds the size limit it is renamed to
/// `<name>.<unix_millis>` and a fresh file is started. Only the newest
/// backups are kept.
///
/// Cloning is cheap; clones share the same file handle.
#[derive(Clone)]
pub struct RotatingFileWriter {
    inner: Arc<Inner>,
}

struct Inner {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Lazily opened on first write.
    file: Mutex<Option<File>>,
}

impl RotatingFileWriter {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                file_path,
                max_bytes,
                max_backups,
                file: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.file_path
    }

    /// Writes one record, rotating first if the file is over the limit.
    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        let mut file = self.inner.file.lock().unwrap_or_else(PoisonError::into_inner);

        self.check_and_rotate(&mut file)?;

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.inner.file_path)?,
            );
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no log file available"))?;

        handle.write_all(buf)?;
        handle.flush()
    }

    fn check_and_rotate(&self, file: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.inner.file_path) {
            if metadata.len() > self.inner.max_bytes {
                *file = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let path = &self.inner.file_path;
        if !path.exists() {
            return Ok(());
        }

        let name = file_name(path)?;
        let mut stamp = chrono::Utc::now().timestamp_millis();
        let mut backup = path.with_file_name(format!("{name}.{stamp}"));
        while backup.exists() {
            stamp += 1;
            backup = path.with_file_name(format!("{name}.{stamp}"));
        }

        fs::rename(path, &backup)?;
        self.cleanup_old_backups()
    }

    /// Deletes backups beyond the retention limit, oldest first. Individual
    /// deletion failures are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let path = &self.inner.file_path;
        let parent = path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file has no parent directory"))?;
        let prefix = format!("{}.", file_name(path)?);

        let mut backups: Vec<(i64, PathBuf)> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter_map(|candidate| {
                let stamp = candidate
                    .file_name()?
                    .to_str()?
                    .strip_prefix(&prefix)?
                    .parse::<i64>()
                    .ok()?;
                Some((stamp, candidate))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, old) in backups.iter().skip(self.inner.max_backups) {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> io::Result<&str> {
    path.file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "invalid log file name"))
}

/// Per-event handle returned by [`MakeWriter::make_writer`].
pub struct RotatingFileHandle {
    writer: RotatingFileWriter,
}

impl Write for RotatingFileHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingFileHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingFileHandle {
            writer: self.clone(),
        }
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("file_path", &self.inner.file_path)
            .field("max_bytes", &self.inner.max_bytes)
            .field("max_backups", &self.inner.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backups_in(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("app.log."))
            .count()
    }

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let writer = RotatingFileWriter::new(dir.path().join("app.log"));

        writer.make_writer().write_all(b"{\"a\":1}\n").unwrap();
        writer.make_writer().write_all(b"{\"b\":2}\n").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(backups_in(dir.path()), 0);
    }

    #[test]
    fn rotates_when_over_limit() {
        let dir = TempDir::new().unwrap();
        let writer = RotatingFileWriter::with_limits(dir.path().join("app.log"), 8, 3);

        writer.make_writer().write_all(b"0123456789\n").unwrap();
        writer.make_writer().write_all(b"next\n").unwrap();

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "next\n");
        assert_eq!(backups_in(dir.path()), 1);
    }

    #[test]
    fn keeps_only_newest_backups() {
        let dir = TempDir::new().unwrap();
        let writer = RotatingFileWriter::with_limits(dir.path().join("app.log"), 1, 2);

        for i in 0..6 {
            writer
                .make_writer()
                .write_all(format!("line {i}\n").as_bytes())
                .unwrap();
        }

        assert_eq!(backups_in(dir.path()), 2);
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "line 5\n");
    }
}
