//! The game store: owner of the persisted session state.

use tracing::{debug, info, instrument, warn};

use super::snapshot::{PersistedState, RoundRecord};
use super::view::{GameStatus, GameView, PlayerWithStats, StatsView};
use super::StoreError;
use crate::games::tictactoe::{MoveError, Players, Position, RoundStatus};
use crate::storage::{StateStorage, StorageError};
use crate::sync::{InstanceId, SyncBridge};

/// What a [`GameStore::player_move`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was appended and persisted; carries the new round status.
    Applied(RoundStatus),
    /// The intent was absorbed without changing anything.
    Ignored(MoveError),
}

/// Owns the moves and statistics of a session and persists them.
///
/// Several stores may share one storage key; each is an independent
/// instance that notices the others through a [`SyncBridge`].
#[derive(Debug)]
pub struct GameStore<S> {
    storage: S,
    key: String,
    players: Players,
    instance: InstanceId,
    snapshot: PersistedState,
}

impl<S: StateStorage> GameStore<S> {
    /// Creates a store over `key`, loading whatever snapshot is stored.
    ///
    /// A missing, unreadable or corrupt snapshot yields the empty state.
    #[instrument(skip(storage, key, players), fields(key = %key.as_ref()))]
    pub fn new(storage: S, key: impl AsRef<str>, players: Players) -> Self {
        let key = key.as_ref().to_string();
        let snapshot = match load_snapshot(&storage, &key) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Starting from empty state");
                PersistedState::default()
            }
        };
        let instance = InstanceId::next();
        info!(%instance, moves = snapshot.moves().len(), "GameStore ready");
        Self {
            storage,
            key,
            players,
            instance,
            snapshot,
        }
    }

    /// Returns the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns this instance's id.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Returns the player configuration.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the snapshot the derived views are computed from.
    pub fn snapshot(&self) -> &PersistedState {
        &self.snapshot
    }

    /// Opens a bridge that fires when other instances write this key.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn bridge(&self) -> SyncBridge {
        SyncBridge::new(&self.key, self.instance, self.storage.subscribe())
    }

    /// Reloads the snapshot from storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if storage cannot be read; the
    /// previous snapshot is kept in that case.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.snapshot = load_snapshot(&self.storage, &self.key)?;
        debug!(moves = self.snapshot.moves().len(), "Snapshot refreshed");
        Ok(())
    }

    /// Plays `square_id` (1-9) for the player whose turn it is.
    ///
    /// Out-of-range squares, occupied squares and moves after the round
    /// ended are ignored. Completing the round records its result in the
    /// same write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state cannot be persisted; the
    /// store then still reflects the last persisted state.
    #[instrument(skip(self), fields(key = %self.key, instance = %self.instance))]
    pub fn player_move(&mut self, square_id: u8) -> Result<MoveOutcome, StoreError> {
        let Some(position) = Position::from_square_id(square_id) else {
            debug!("Ignoring square outside the board");
            return Ok(MoveOutcome::Ignored(MoveError::InvalidSquare(square_id)));
        };

        self.refresh()?;
        let mut next = self.snapshot.clone();
        let mv = match next.moves_mut().play(position) {
            Ok(mv) => mv,
            Err(e) => {
                debug!(error = %e, "Ignoring move");
                return Ok(MoveOutcome::Ignored(e));
            }
        };

        let status = next.moves().status();
        if let Some(record) = RoundRecord::from_status(status) {
            info!(?record, "Round complete");
            next.record(record);
        }

        self.commit(next)?;
        info!(%mv, "Move played");
        Ok(MoveOutcome::Applied(status))
    }

    /// Clears the current round's moves; statistics are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state cannot be persisted.
    #[instrument(skip(self), fields(key = %self.key, instance = %self.instance))]
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.clear_round()?;
        info!("Round reset");
        Ok(())
    }

    /// Starts a new round; statistics are kept.
    ///
    /// Same effect on the board as [`reset`](Self::reset), kept as its own
    /// intent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state cannot be persisted.
    #[instrument(skip(self), fields(key = %self.key, instance = %self.instance))]
    pub fn new_round(&mut self) -> Result<(), StoreError> {
        self.clear_round()?;
        info!("New round started");
        Ok(())
    }

    /// Forgets all completed-round records; the current round is kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state cannot be persisted.
    #[instrument(skip(self), fields(key = %self.key, instance = %self.instance))]
    pub fn clear_stats(&mut self) -> Result<(), StoreError> {
        self.refresh()?;
        let mut next = self.snapshot.clone();
        next.clear_history();
        self.commit(next)?;
        info!("Statistics cleared");
        Ok(())
    }

    /// Derives the board view from the snapshot.
    pub fn game(&self) -> GameView {
        let round = self.snapshot.moves();
        let status = round.status();
        GameView::new(
            round.moves().to_vec(),
            self.players.get(round.current_player()).clone(),
            GameStatus::new(
                status.is_complete,
                status.winner.map(|id| self.players.get(id).clone()),
            ),
        )
    }

    /// Derives the statistics view from the snapshot.
    pub fn stats(&self) -> StatsView {
        let tally = self.snapshot.tally();
        let player_with_stats = self
            .players
            .iter()
            .map(|player| PlayerWithStats::new(player.clone(), tally.wins(*player.id())))
            .collect();
        StatsView::new(player_with_stats, tally.ties)
    }

    fn clear_round(&mut self) -> Result<(), StoreError> {
        self.refresh()?;
        let mut next = self.snapshot.clone();
        next.clear_moves();
        self.commit(next)
    }

    /// Writes `next` and adopts it only once the write succeeded.
    fn commit(&mut self, next: PersistedState) -> Result<(), StoreError> {
        let text = next.to_json()?;
        self.storage.write(&self.key, &text, self.instance)?;
        self.snapshot = next;
        Ok(())
    }
}

#[instrument(skip(storage))]
fn load_snapshot<S: StateStorage>(storage: &S, key: &str) -> Result<PersistedState, StorageError> {
    Ok(storage
        .read(key)?
        .map(|text| PersistedState::from_json_or_default(&text))
        .unwrap_or_default())
}
