//! View intents and their dispatch.
//!
//! Views never touch the store directly; they emit an [`Intent`] and the
//! dispatcher routes it to whatever handlers were registered, independent
//! of the UI toolkit producing it.

use tracing::{debug, instrument};

use crate::games::tictactoe::Position;
use crate::storage::StateStorage;
use crate::store::{GameStore, StoreError};

/// A high-level request emitted by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// The player clicked a square (raw id; the store validates it).
    Move {
        /// Square id as reported by the view.
        square_id: u8,
    },
    /// Clear the board.
    Reset,
    /// Start the next round.
    NewRound,
}

impl Intent {
    /// Parses a typed command: a square id or label, `reset`/`r`, or
    /// `new-round`/`new`/`n`.
    #[instrument]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "reset" | "r" => return Some(Self::Reset),
            "new-round" | "new" | "n" => return Some(Self::NewRound),
            _ => {}
        }
        if let Ok(square_id) = s.parse::<u8>() {
            return Some(Self::Move { square_id });
        }
        Position::parse(s).map(|pos| Self::Move {
            square_id: pos.square_id(),
        })
    }
}

type MoveHandler<C> = Box<dyn FnMut(&mut C, u8) -> Result<(), StoreError>>;
type Handler<C> = Box<dyn FnMut(&mut C) -> Result<(), StoreError>>;

/// Callback registry for intents, generic over the context handlers act on.
pub struct IntentDispatcher<C> {
    on_move: Vec<MoveHandler<C>>,
    on_reset: Vec<Handler<C>>,
    on_new_round: Vec<Handler<C>>,
}

impl<C> std::fmt::Debug for IntentDispatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentDispatcher")
            .field("on_move", &self.on_move.len())
            .field("on_reset", &self.on_reset.len())
            .field("on_new_round", &self.on_new_round.len())
            .finish()
    }
}

impl<C> Default for IntentDispatcher<C> {
    fn default() -> Self {
        Self {
            on_move: Vec::new(),
            on_reset: Vec::new(),
            on_new_round: Vec::new(),
        }
    }
}

impl<C> IntentDispatcher<C> {
    /// Creates a dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for square clicks.
    pub fn on_move(
        &mut self,
        handler: impl FnMut(&mut C, u8) -> Result<(), StoreError> + 'static,
    ) -> &mut Self {
        self.on_move.push(Box::new(handler));
        self
    }

    /// Registers a handler for reset requests.
    pub fn on_reset(
        &mut self,
        handler: impl FnMut(&mut C) -> Result<(), StoreError> + 'static,
    ) -> &mut Self {
        self.on_reset.push(Box::new(handler));
        self
    }

    /// Registers a handler for new-round requests.
    pub fn on_new_round(
        &mut self,
        handler: impl FnMut(&mut C) -> Result<(), StoreError> + 'static,
    ) -> &mut Self {
        self.on_new_round.push(Box::new(handler));
        self
    }

    /// Runs every handler registered for `intent`, in registration order,
    /// and returns how many ran.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first handler error.
    #[instrument(skip(self, ctx))]
    pub fn dispatch(&mut self, ctx: &mut C, intent: Intent) -> Result<usize, StoreError> {
        let ran = match intent {
            Intent::Move { square_id } => {
                for handler in &mut self.on_move {
                    handler(ctx, square_id)?;
                }
                self.on_move.len()
            }
            Intent::Reset => {
                for handler in &mut self.on_reset {
                    handler(ctx)?;
                }
                self.on_reset.len()
            }
            Intent::NewRound => {
                for handler in &mut self.on_new_round {
                    handler(ctx)?;
                }
                self.on_new_round.len()
            }
        };
        debug!(ran, "Intent dispatched");
        Ok(ran)
    }
}

impl<S: StateStorage + 'static> IntentDispatcher<GameStore<S>> {
    /// Dispatcher wired to the store's own operations.
    pub fn for_store() -> Self {
        let mut dispatcher = Self::new();
        dispatcher
            .on_move(|store: &mut GameStore<S>, square_id| store.player_move(square_id).map(|_| ()))
            .on_reset(|store: &mut GameStore<S>| store.reset())
            .on_new_round(|store: &mut GameStore<S>| store.new_round());
        dispatcher
    }
}
