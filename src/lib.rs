//! Strictly Rounds library - persistent, synchronized tic-tac-toe state
//!
//! This library owns the state of a two-player tic-tac-toe session and
//! keeps several independent views of that session consistent.
//!
//! # Architecture
//!
//! - **Games**: Pure tic-tac-toe rules (moves, rounds, win/draw detection)
//! - **Store**: [`GameStore`] persists moves and round results after every
//!   mutation and derives [`GameView`] / [`StatsView`] on demand
//! - **Storage**: [`StateStorage`] backends ([`MemoryStorage`], [`FileStorage`])
//!   that announce writes
//! - **Sync**: [`SyncBridge`] fires when *another* instance changed the state
//! - **Controller**: [`GameController`] routes view [`Intent`]s to the store
//!   and re-renders a [`View`]
//!
//! # Example
//!
//! ```
//! use strictly_rounds::{GameStore, MemoryStorage, Players};
//!
//! # fn example() -> Result<(), strictly_rounds::StoreError> {
//! let storage = MemoryStorage::new();
//! let mut tab_a = GameStore::new(storage.clone(), "game-state-key", Players::default());
//! let mut tab_b = GameStore::new(storage, "game-state-key", Players::default());
//! let mut bridge = tab_b.bridge();
//!
//! tab_a.player_move(5)?;
//!
//! assert!(bridge.poll_change());
//! tab_b.refresh()?;
//! assert_eq!(tab_b.game(), tab_a.game());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod games;
mod intents;
mod storage;
mod store;
mod sync;
mod text_view;

// Crate-level exports - Configuration
pub use config::{ConfigError, StoreConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    MismatchedPlayers, Move, MoveError, OutOfRange, Player, PlayerId, Players, Position, Round,
    RoundStatus, rules,
};

// Crate-level exports - Store
pub use store::{
    GameStatus, GameStore, GameView, History, MoveOutcome, PersistedState, PlayerWithStats,
    RecordStatus, RoundRecord, StatsView, StoreError, Tally,
};

// Crate-level exports - Storage backends
pub use storage::{FileStorage, MemoryStorage, StateStorage, StorageError};

// Crate-level exports - Cross-instance sync
pub use sync::{ChangeFeed, InstanceId, StorageEvent, SyncBridge};

// Crate-level exports - Intents and views
pub use controller::{GameController, View};
pub use intents::{Intent, IntentDispatcher};
pub use text_view::{TextView, board_text, stats_line, status_line};
