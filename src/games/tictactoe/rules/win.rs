//! Win detection logic for tic-tac-toe.

use super::super::{Move, PlayerId, Position};
use tracing::{instrument, warn};

/// The eight lines that win the game, in evaluation order.
pub const WINNING_TRIPLES: [[Position; 3]; 8] = [
    // Top row
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    // Diagonal
    [Position::TopLeft, Position::Center, Position::BottomRight],
    // Left column
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    // Middle column
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    // Anti-diagonal
    [Position::TopRight, Position::Center, Position::BottomLeft],
    // Right column
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Middle row
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    // Bottom row
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
];

/// Returns the squares held by `player`, in move order.
pub fn squares_of(moves: &[Move], player: PlayerId) -> Vec<Position> {
    moves
        .iter()
        .filter(|m| m.player_id() == player)
        .map(|m| m.square_id())
        .collect()
}

/// Checks if there is a winner among the moves.
///
/// Both players are tested against every triple. Legal alternating play
/// stops at the first win, so at most one player can hold a triple; if a
/// hand-built move list breaks that, the later match in [`WINNING_TRIPLES`]
/// order is returned.
#[instrument(skip(moves), fields(moves = moves.len()))]
pub fn check_winner(moves: &[Move]) -> Option<PlayerId> {
    let one = squares_of(moves, PlayerId::One);
    let two = squares_of(moves, PlayerId::Two);

    let mut winner = None;
    let mut one_wins = false;
    let mut two_wins = false;

    for triple in &WINNING_TRIPLES {
        if triple.iter().all(|cell| one.contains(cell)) {
            one_wins = true;
            winner = Some(PlayerId::One);
        }
        if triple.iter().all(|cell| two.contains(cell)) {
            two_wins = true;
            winner = Some(PlayerId::Two);
        }
    }

    debug_assert!(
        !(one_wins && two_wins),
        "both players hold a winning triple"
    );
    if one_wins && two_wins {
        warn!(?winner, "Both players hold a winning triple");
    }

    winner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(seq: &[(u8, PlayerId)]) -> Vec<Move> {
        seq.iter()
            .map(|(sq, p)| Move::new(Position::from_square_id(*sq).unwrap(), *p))
            .collect()
    }

    #[test]
    fn test_no_winner_empty() {
        assert_eq!(check_winner(&[]), None);
    }

    #[test]
    fn test_every_triple_wins_for_either_player() {
        for triple in WINNING_TRIPLES {
            for player in [PlayerId::One, PlayerId::Two] {
                let moves: Vec<Move> = triple.iter().map(|p| Move::new(*p, player)).collect();
                assert_eq!(check_winner(&moves), Some(player), "{triple:?}");
            }
        }
    }

    #[test]
    fn test_triples_are_distinct_and_three_cells() {
        for (i, a) in WINNING_TRIPLES.iter().enumerate() {
            let mut cells = a.to_vec();
            cells.dedup();
            assert_eq!(cells.len(), 3);
            for b in &WINNING_TRIPLES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_winner_diagonal() {
        use PlayerId::*;
        let moves = play(&[(1, One), (3, Two), (4, One), (5, Two), (2, One), (7, Two)]);
        assert_eq!(check_winner(&moves), Some(Two));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        use PlayerId::*;
        let moves = play(&[(1, One), (2, Two), (3, One)]);
        assert_eq!(check_winner(&moves), None);
    }

    #[test]
    fn test_triple_found_in_any_move_order() {
        use PlayerId::*;
        let moves = play(&[(9, One), (2, Two), (1, One), (3, Two), (5, One)]);
        assert_eq!(check_winner(&moves), Some(One));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "both players hold a winning triple")]
    fn test_both_players_winning_is_rejected() {
        use PlayerId::*;
        let moves = play(&[(1, One), (4, Two), (2, One), (5, Two), (3, One), (6, Two)]);
        check_winner(&moves);
    }
}
