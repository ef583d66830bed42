//! Draw detection logic for tic-tac-toe.

use super::super::Move;
use tracing::instrument;

/// Checks if the board is full (all nine squares taken).
#[instrument(skip(moves), fields(moves = moves.len()))]
pub fn is_full(moves: &[Move]) -> bool {
    moves.len() == 9
}

#[cfg(test)]
mod tests {
    use super::super::super::{PlayerId, Position};
    use super::super::derive_status;
    use super::*;

    fn fill(order: [u8; 9]) -> Vec<Move> {
        let mut player = PlayerId::One;
        order
            .iter()
            .map(|sq| {
                let m = Move::new(Position::from_square_id(*sq).unwrap(), player);
                player = player.opponent();
                m
            })
            .collect()
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&[]));
    }

    #[test]
    fn test_partial_board_not_full() {
        let moves = fill([5, 1, 9, 3, 2, 8, 4, 6, 7]);
        assert!(!is_full(&moves[..8]));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let moves = fill([1, 2, 3, 5, 4, 6, 8, 7, 9]);
        assert!(is_full(&moves));
        assert!(derive_status(&moves).is_draw());
    }

    #[test]
    fn test_not_draw_if_winner() {
        // Player 1 completes the bottom row on the last move.
        let moves = fill([2, 1, 4, 3, 7, 5, 9, 6, 8]);
        assert!(is_full(&moves));
        assert!(!derive_status(&moves).is_draw());
    }
}
