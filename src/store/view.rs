//! Derived data handed to views.

use derive_getters::Getters;
use derive_new::new;

use crate::games::tictactoe::{Move, Player};

/// Status of the current round with the winner resolved to its player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameStatus {
    /// Whether the round is over.
    is_complete: bool,
    /// Winning player, if any.
    winner: Option<Player>,
}

/// Everything a view needs to draw the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameView {
    /// Moves of the current round in turn order.
    moves: Vec<Move>,
    /// Player whose turn it is.
    current_player: Player,
    /// Derived round status.
    status: GameStatus,
}

/// A player's configuration joined with their win count.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct PlayerWithStats {
    /// The player.
    player: Player,
    /// Rounds won.
    wins: u32,
}

/// Running statistics across rounds.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct StatsView {
    /// Both players in seat order.
    player_with_stats: Vec<PlayerWithStats>,
    /// Rounds drawn.
    ties: u32,
}
