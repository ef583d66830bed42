//! The move list of a single round.

use super::rules::derive_status;
use super::{Move, MoveError, PlayerId, Position, RoundStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Ordered, append-only list of the moves in the current round.
///
/// Every value of this type satisfies the round invariants: squares are
/// unique, players alternate starting with [`PlayerId::One`], and no move
/// follows a completed round. Deserialization replays the moves and rejects
/// lists that break any of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Move>", into = "Vec<Move>")]
pub struct Round {
    moves: Vec<Move>,
}

impl Round {
    /// Creates an empty round.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a round by replaying `moves` in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveError`] the replay hits.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn from_moves(moves: Vec<Move>) -> Result<Self, MoveError> {
        let mut round = Self::new();
        for mv in moves {
            round.push(mv)?;
        }
        Ok(round)
    }

    /// Returns the moves in turn order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves played.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True before the first move.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Player whose turn it is: player 1 on an empty round, otherwise the
    /// opponent of the last mover.
    pub fn current_player(&self) -> PlayerId {
        self.moves
            .last()
            .map_or(PlayerId::One, |last| last.player_id().opponent())
    }

    /// Checks whether a square has already been played.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.moves.iter().any(|m| m.square_id() == pos)
    }

    /// Squares nobody has played yet.
    pub fn open_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| !self.is_occupied(*pos))
            .collect()
    }

    /// Derives the round status from the moves.
    pub fn status(&self) -> RoundStatus {
        derive_status(&self.moves)
    }

    /// Plays `pos` for the current player.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the round is complete and
    /// [`MoveError::SquareOccupied`] if the square was already played.
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn play(&mut self, pos: Position) -> Result<Move, MoveError> {
        let mv = Move::new(pos, self.current_player());
        self.push(mv)?;
        Ok(mv)
    }

    fn push(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.status().is_complete {
            return Err(MoveError::GameOver);
        }
        if self.is_occupied(mv.square_id()) {
            return Err(MoveError::SquareOccupied(mv.square_id()));
        }
        if mv.player_id() != self.current_player() {
            return Err(MoveError::WrongPlayer(mv.player_id()));
        }
        debug!(%mv, "Move appended");
        self.moves.push(mv);
        Ok(())
    }
}

impl TryFrom<Vec<Move>> for Round {
    type Error = MoveError;

    fn try_from(moves: Vec<Move>) -> Result<Self, Self::Error> {
        Self::from_moves(moves)
    }
}

impl From<Round> for Vec<Move> {
    fn from(round: Round) -> Self {
        round.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(sq: u8) -> Position {
        Position::from_square_id(sq).unwrap()
    }

    #[test]
    fn test_players_alternate_from_one() {
        let mut round = Round::new();
        assert_eq!(round.current_player(), PlayerId::One);
        assert_eq!(round.play(at(5)).unwrap().player_id(), PlayerId::One);
        assert_eq!(round.current_player(), PlayerId::Two);
        assert_eq!(round.play(at(1)).unwrap().player_id(), PlayerId::Two);
        assert_eq!(round.current_player(), PlayerId::One);
    }

    #[test]
    fn test_occupied_square_rejected() {
        let mut round = Round::new();
        round.play(at(5)).unwrap();
        assert_eq!(round.play(at(5)), Err(MoveError::SquareOccupied(at(5))));
        assert_eq!(round.len(), 1);
    }

    #[test]
    fn test_no_move_after_win() {
        let mut round = Round::new();
        for sq in [1, 2, 4, 5, 7] {
            round.play(at(sq)).unwrap();
        }
        assert_eq!(round.play(at(9)), Err(MoveError::GameOver));
        assert_eq!(round.open_positions().len(), 4);
    }

    #[test]
    fn test_from_moves_rejects_wrong_turn() {
        let moves = vec![Move::new(at(1), PlayerId::Two)];
        assert_eq!(
            Round::from_moves(moves),
            Err(MoveError::WrongPlayer(PlayerId::Two))
        );
    }

    #[test]
    fn test_from_moves_rejects_duplicate_square() {
        let moves = vec![
            Move::new(at(1), PlayerId::One),
            Move::new(at(1), PlayerId::Two),
        ];
        assert!(Round::from_moves(moves).is_err());
    }

    #[test]
    fn test_deserialize_rejects_move_after_win() {
        let json = r#"[
            {"squareId":1,"playerId":1},{"squareId":2,"playerId":2},
            {"squareId":4,"playerId":1},{"squareId":5,"playerId":2},
            {"squareId":7,"playerId":1},{"squareId":8,"playerId":2}
        ]"#;
        assert!(serde_json::from_str::<Round>(json).is_err());
    }
}
