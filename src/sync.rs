//! Cross-instance change notification.
//!
//! Every storage backend publishes a [`StorageEvent`] after a successful
//! write. A [`SyncBridge`] listens for events on one storage key and fires
//! only for writes made by *other* store instances, so a view can re-pull
//! derived state without re-running game logic.

use std::sync::atomic::{AtomicU64, Ordering};

use derive_getters::Getters;
use derive_new::new;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, instrument, warn};

/// Buffered events per subscriber before older ones are dropped.
const FEED_CAPACITY: usize = 64;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity of one running store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("instance-{}", _0)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocates an id unique within this process.
    pub fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

/// A completed write to shared storage.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct StorageEvent {
    /// Key that was written.
    key: String,
    /// Instance that performed the write.
    origin: InstanceId,
}

/// Fan-out of [`StorageEvent`]s to every subscriber of a storage backend.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StorageEvent>,
}

impl ChangeFeed {
    /// Creates a feed with no subscribers.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self { sender }
    }

    /// Announces a write to all current subscribers.
    #[instrument(skip(self))]
    pub fn publish(&self, key: &str, origin: InstanceId) {
        match self.sender.send(StorageEvent::new(key.to_string(), origin)) {
            Ok(receivers) => debug!(receivers, "Storage event published"),
            Err(_) => debug!("Storage event dropped, no subscribers"),
        }
    }

    /// Opens a new subscription that sees events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

type ChangeCallback = Box<dyn FnMut() + Send>;

/// Notifies a local view when another instance changes its storage key.
pub struct SyncBridge {
    key: String,
    instance: InstanceId,
    receiver: broadcast::Receiver<StorageEvent>,
    callbacks: Vec<ChangeCallback>,
}

impl std::fmt::Debug for SyncBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncBridge")
            .field("key", &self.key)
            .field("instance", &self.instance)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl SyncBridge {
    /// Creates a bridge for `instance` watching `key` on `receiver`.
    #[instrument(skip(key, receiver), fields(key = %key.as_ref()))]
    pub fn new(
        key: impl AsRef<str>,
        instance: InstanceId,
        receiver: broadcast::Receiver<StorageEvent>,
    ) -> Self {
        Self {
            key: key.as_ref().to_string(),
            instance,
            receiver,
            callbacks: Vec::new(),
        }
    }

    /// Returns the storage key this bridge watches.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Registers a callback fired once per [`pump`](Self::pump) that saw an
    /// external change.
    pub fn on_external_change(&mut self, callback: impl FnMut() + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Drains pending events and reports whether any came from another
    /// instance writing this key.
    ///
    /// A subscriber that fell behind and lost events reports a change, since
    /// the lost events may have been foreign writes.
    #[instrument(skip(self), fields(key = %self.key, instance = %self.instance))]
    pub fn poll_change(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if event.key() != &self.key {
                        continue;
                    }
                    if *event.origin() == self.instance {
                        debug!("Ignoring own write");
                        continue;
                    }
                    debug!(origin = %event.origin(), "External write observed");
                    changed = true;
                }
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(missed, "Sync bridge lagged, assuming external change");
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Closed) => {
                    debug!("Storage feed closed");
                    break;
                }
            }
        }
        changed
    }

    /// Polls for changes and runs the registered callbacks if any were seen.
    ///
    /// Returns whether callbacks ran.
    pub fn pump(&mut self) -> bool {
        if !self.poll_change() {
            return false;
        }
        for callback in &mut self.callbacks {
            callback();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_instance_ids_unique() {
        assert_ne!(InstanceId::next(), InstanceId::next());
    }

    #[test]
    fn test_own_writes_filtered() {
        let feed = ChangeFeed::new();
        let me = InstanceId::next();
        let mut bridge = SyncBridge::new("k", me, feed.subscribe());
        feed.publish("k", me);
        assert!(!bridge.poll_change());
    }

    #[test]
    fn test_foreign_write_on_key_fires() {
        let feed = ChangeFeed::new();
        let me = InstanceId::next();
        let other = InstanceId::next();
        let mut bridge = SyncBridge::new("k", me, feed.subscribe());
        feed.publish("other-key", other);
        assert!(!bridge.poll_change());
        feed.publish("k", other);
        assert!(bridge.poll_change());
        assert!(!bridge.poll_change(), "events are drained");
    }

    #[test]
    fn test_pump_runs_callbacks_once_per_batch() {
        let feed = ChangeFeed::new();
        let me = InstanceId::next();
        let other = InstanceId::next();
        let mut bridge = SyncBridge::new("k", me, feed.subscribe());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        bridge.on_external_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        feed.publish("k", other);
        feed.publish("k", other);
        assert!(bridge.pump());
        assert!(!bridge.pump());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lagged_subscriber_reports_change() {
        let feed = ChangeFeed::new();
        let me = InstanceId::next();
        let mut bridge = SyncBridge::new("k", me, feed.subscribe());
        for _ in 0..FEED_CAPACITY * 2 {
            feed.publish("k", me);
        }
        assert!(bridge.poll_change());
    }
}
