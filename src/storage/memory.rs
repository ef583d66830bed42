//! In-process storage backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, instrument};

use super::{StateStorage, StorageError};
use crate::sync::{ChangeFeed, InstanceId, StorageEvent};

/// Storage backed by a shared in-memory map.
///
/// Cloning yields another handle to the same map and feed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    feed: ChangeFeed,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Creates an empty store without a size limit.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects values longer than `quota` bytes.
    #[instrument]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::new("Memory storage lock poisoned"))
    }

    /// Stores `value` without announcing it, as an outside tool editing the
    /// medium would.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the lock is poisoned.
    #[instrument(skip(self, value))]
    pub fn write_silently(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl StateStorage for MemoryStorage {
    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn write(&self, key: &str, value: &str, origin: InstanceId) -> Result<(), StorageError> {
        if let Some(quota) = self.quota
            && value.len() > quota
        {
            return Err(StorageError::new(format!(
                "Quota exceeded: {} bytes over limit of {}",
                value.len(),
                quota
            )));
        }

        self.entries()?.insert(key.to_string(), value.to_string());
        debug!("Value stored");
        self.feed.publish(key, origin);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.feed.subscribe()
    }
}
