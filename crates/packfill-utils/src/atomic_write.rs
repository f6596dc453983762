//! Atomic file writes for the pack size store
//!
//! Content goes to a temporary file in the target directory, is fsynced, and
//! is then renamed over the target. Readers see either the old document or
//! the new one, never a partial write.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::Write;
use std::thread;
use std::time::Duration;

use tempfile::NamedTempFile;

/// Rename attempts before giving up on a transiently locked target
const MAX_RENAME_ATTEMPTS: u32 = 4;

/// Initial backoff between rename attempts, doubled each retry
const INITIAL_RENAME_DELAY_MS: u64 = 10;

/// Atomically replace `path` with `content`.
///
/// Parent directories are created as needed. Returns the number of rename
/// retries that were required.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<u32> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create parent directory: {parent}"))?;

    let mut temp_file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in: {parent}"))?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write content to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to fsync temporary file")?;

    let mut retries = 0;
    loop {
        match temp_file.persist(path.as_std_path()) {
            Ok(_) => return Ok(retries),
            Err(persist_error) => {
                let retryable =
                    persist_error.error.kind() == std::io::ErrorKind::PermissionDenied;
                if !retryable || retries + 1 >= MAX_RENAME_ATTEMPTS {
                    return Err(anyhow::anyhow!(persist_error.error))
                        .with_context(|| format!("Failed to atomically write file: {path}"));
                }
                thread::sleep(Duration::from_millis(
                    INITIAL_RENAME_DELAY_MS * 2_u64.pow(retries),
                ));
                retries += 1;
                temp_file = persist_error.file;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_atomic_write_basic() {
        let dir = TempDir::new().unwrap();
        let path = utf8_path(&dir, "sizes.json");

        let retries = write_file_atomic(&path, "{\"version\":1}").unwrap();
        assert_eq!(retries, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"version\":1}");
    }

    #[test]
    fn test_atomic_write_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = utf8_path(&dir, "nested/deeper/sizes.json");

        write_file_atomic(&path, "[]").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = utf8_path(&dir, "sizes.json");

        write_file_atomic(&path, "first").unwrap();
        write_file_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = utf8_path(&dir, "sizes.json");

        write_file_atomic(&path, "content").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
