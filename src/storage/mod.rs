//! Shared key-value storage for persisted game state.
//!
//! A backend holds serialized snapshots under string keys and announces
//! every successful write on its [`ChangeFeed`](crate::ChangeFeed), which is
//! what lets sibling store instances notice each other's changes.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use tokio::sync::broadcast;

use crate::sync::{InstanceId, StorageEvent};

/// Port for the shared medium snapshots are written to.
///
/// Clones of a backend handle must share both the stored data and the
/// change feed, the way browser tabs share one origin's local storage.
pub trait StateStorage: std::fmt::Debug {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key` and announces the write as coming
    /// from `origin`.
    ///
    /// The event is published only after the value is durable; a failed
    /// write publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium rejects the write.
    fn write(&self, key: &str, value: &str, origin: InstanceId) -> Result<(), StorageError>;

    /// Subscribes to write announcements.
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}
