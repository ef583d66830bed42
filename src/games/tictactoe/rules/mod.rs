//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a round
//! according to tic-tac-toe rules. Nothing here is cached: status is
//! recomputed from the move list on every call.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WINNING_TRIPLES, check_winner, squares_of};

use super::{Move, RoundStatus};
use tracing::instrument;

/// Derives the status of a round from its moves.
///
/// A round is complete when a player holds a winning triple or all nine
/// squares are taken.
#[instrument(skip(moves), fields(moves = moves.len()))]
pub fn derive_status(moves: &[Move]) -> RoundStatus {
    let winner = check_winner(moves);
    RoundStatus {
        is_complete: winner.is_some() || is_full(moves),
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{PlayerId, Position};
    use super::*;

    fn moves(seq: &[(u8, PlayerId)]) -> Vec<Move> {
        seq.iter()
            .map(|(sq, p)| Move::new(Position::from_square_id(*sq).unwrap(), *p))
            .collect()
    }

    #[test]
    fn test_empty_round_in_progress() {
        assert_eq!(derive_status(&[]), RoundStatus::default());
    }

    #[test]
    fn test_left_column_win() {
        use PlayerId::*;
        let status = derive_status(&moves(&[(1, One), (2, Two), (4, One), (5, Two), (7, One)]));
        assert!(status.is_complete);
        assert_eq!(status.winner, Some(One));
    }

    #[test]
    fn test_full_board_draw() {
        use PlayerId::*;
        // X O X / X O O / O X X
        let status = derive_status(&moves(&[
            (1, One),
            (2, Two),
            (3, One),
            (5, Two),
            (4, One),
            (6, Two),
            (8, One),
            (7, Two),
            (9, One),
        ]));
        assert!(status.is_complete);
        assert_eq!(status.winner, None);
        assert!(status.is_draw());
    }

    #[test]
    fn test_partial_without_triple_incomplete() {
        use PlayerId::*;
        let status = derive_status(&moves(&[(1, One), (5, Two), (9, One), (3, Two)]));
        assert!(!status.is_complete);
        assert_eq!(status.winner, None);
    }

    #[test]
    fn test_win_on_ninth_move_is_not_draw() {
        use PlayerId::*;
        // Player 1 completes the bottom row with the last square.
        let status = derive_status(&moves(&[
            (2, One),
            (1, Two),
            (4, One),
            (3, Two),
            (7, One),
            (5, Two),
            (9, One),
            (6, Two),
            (8, One),
        ]));
        assert!(status.is_complete);
        assert_eq!(status.winner, Some(One));
        assert!(!status.is_draw());
    }
}
