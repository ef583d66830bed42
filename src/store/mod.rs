//! Persistent game store and the views derived from it.

mod error;
mod game_store;
mod snapshot;
mod view;

pub use error::StoreError;
pub use game_store::{GameStore, MoveOutcome};
pub use snapshot::{History, PersistedState, RecordStatus, RoundRecord, Tally};
pub use view::{GameStatus, GameView, PlayerWithStats, StatsView};
