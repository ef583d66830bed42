//! Store error types.

use derive_more::{Display, Error, From};

use crate::storage::StorageError;

/// Failure of a store operation.
///
/// Invalid intents are not errors; only a failure to persist the resulting
/// state is reported.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    /// The shared medium could not be read or written.
    #[display("{}", _0)]
    Storage(StorageError),

    /// The snapshot could not be serialized.
    #[display("Snapshot serialization failed: {}", _0)]
    Serialize(serde_json::Error),
}
