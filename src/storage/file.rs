//! Filesystem storage backend.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use super::{StateStorage, StorageError};
use crate::sync::{ChangeFeed, InstanceId, StorageEvent};

/// Storage keeping one JSON file per key inside a directory.
///
/// Writes land in a temporary file that is then renamed over the target,
/// so a reader never sees a half-written snapshot. Change events reach the
/// clones of this handle only; separate processes sharing the directory
/// pick up each other's writes by re-reading.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    feed: ChangeFeed,
}

impl FileStorage {
    /// Opens (and creates if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::new(format!(
                "Failed to create storage directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        info!(dir = %dir.display(), "Opened file storage");
        Ok(Self {
            dir,
            feed: ChangeFeed::new(),
        })
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StateStorage for FileStorage {
    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Ok(Some(text)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Stored value is not UTF-8");
                    Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(StorageError::new(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn write(&self, key: &str, value: &str, origin: InstanceId) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        let staged = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(value.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = staged {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::new(format!(
                "Failed to stage '{}': {}",
                tmp.display(),
                e
            )));
        }

        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StorageError::new(format!(
                "Failed to replace '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "Value stored");
        self.feed.publish(key, origin);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.read("game").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        let mut rx = storage.subscribe();
        let origin = InstanceId::next();

        storage.write("game", "{}", origin).unwrap();
        storage.write("game", "{\"moves\":[]}", origin).unwrap();

        assert_eq!(
            storage.read("game").unwrap().as_deref(),
            Some("{\"moves\":[]}")
        );
        assert_eq!(*rx.try_recv().unwrap().origin(), origin);
        assert!(!storage.path_for("game").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_non_utf8_value_reads_lossy() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        fs::write(storage.path_for("game"), [0xFF, 0xFE, 0x00]).unwrap();
        let text = storage.read("game").unwrap().unwrap();
        assert!(text.starts_with('\u{FFFD}'));
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        // A directory at the target path makes the final rename fail.
        fs::create_dir(storage.path_for("game")).unwrap();
        assert!(storage.write("game", "{}", InstanceId::next()).is_err());
        assert!(!storage.path_for("game").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_key_is_sanitized_into_directory() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        let path = storage.path_for("../escape/key");
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.file_name().unwrap(), "___escape_key.json");
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        assert!(storage.dir().is_dir());
    }
}
