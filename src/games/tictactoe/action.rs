//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{PlayerId, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a player placing their mark at a square.
///
/// Serialized as `{"squareId": 1-9, "playerId": 1|2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    square_id: Position,
    player_id: PlayerId,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(square_id: Position, player_id: PlayerId) -> Self {
        Self {
            square_id,
            player_id,
        }
    }

    /// Returns the square of this move.
    pub fn square_id(&self) -> Position {
        self.square_id
    }

    /// Returns the player making this move.
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {} -> {}", self.player_id, self.square_id.label())
    }
}

/// Reason a move could not be applied to a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square id does not name a square on the board.
    #[display("Square id {} is not on the board", _0)]
    InvalidSquare(u8),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The round is already over.
    #[display("Round is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not player {}'s turn", _0)]
    WrongPlayer(PlayerId),
}

impl std::error::Error for MoveError {}
