//! The persisted state of a game session.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::games::tictactoe::{PlayerId, Round, RoundStatus};

/// How a completed round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// A player completed a winning triple.
    Win,
    /// The board filled with no winner.
    Draw,
}

/// Result of one completed round, as stored in the history.
///
/// Serialized as `{"winner": 1|2|null, "status": "win"|"draw"}`; a win
/// always names a winner and a draw never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoundRecord", into = "RawRoundRecord")]
pub enum RoundRecord {
    /// The round was won.
    Win(PlayerId),
    /// The round was drawn.
    Draw,
}

#[derive(Serialize, Deserialize)]
struct RawRoundRecord {
    winner: Option<PlayerId>,
    status: RecordStatus,
}

impl TryFrom<RawRoundRecord> for RoundRecord {
    type Error = String;

    fn try_from(raw: RawRoundRecord) -> Result<Self, Self::Error> {
        match (raw.status, raw.winner) {
            (RecordStatus::Win, Some(winner)) => Ok(Self::Win(winner)),
            (RecordStatus::Draw, None) => Ok(Self::Draw),
            (status, winner) => Err(format!(
                "round record {status:?} inconsistent with winner {winner:?}"
            )),
        }
    }
}

impl From<RoundRecord> for RawRoundRecord {
    fn from(record: RoundRecord) -> Self {
        match record {
            RoundRecord::Win(winner) => Self {
                winner: Some(winner),
                status: RecordStatus::Win,
            },
            RoundRecord::Draw => Self {
                winner: None,
                status: RecordStatus::Draw,
            },
        }
    }
}

impl RoundRecord {
    /// Builds the record for a finished round, or `None` if it is still
    /// in progress.
    pub fn from_status(status: RoundStatus) -> Option<Self> {
        match (status.is_complete, status.winner) {
            (false, _) => None,
            (true, Some(winner)) => Some(Self::Win(winner)),
            (true, None) => Some(Self::Draw),
        }
    }
}

/// Completed-round records kept across rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase", default)]
pub struct History {
    current_round_games: Vec<RoundRecord>,
}

/// Win and tie counts tallied from the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Wins for player 1.
    pub player_one_wins: u32,
    /// Wins for player 2.
    pub player_two_wins: u32,
    /// Rounds drawn.
    pub ties: u32,
}

impl Tally {
    /// Wins credited to `player`.
    pub fn wins(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.player_one_wins,
            PlayerId::Two => self.player_two_wins,
        }
    }
}

/// Complete snapshot written to shared storage.
///
/// This is the single source of truth: every store instance derives game
/// and statistics views from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct PersistedState {
    moves: Round,
    history: History,
}

impl PersistedState {
    /// Parses a stored snapshot, falling back to the empty state when the
    /// text is malformed or describes an impossible round.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn from_json_or_default(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Discarding corrupt snapshot");
                Self::default()
            }
        }
    }

    /// Serializes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Mutable access to the current round.
    pub fn moves_mut(&mut self) -> &mut Round {
        &mut self.moves
    }

    /// Appends a completed-round record.
    pub fn record(&mut self, record: RoundRecord) {
        self.history.current_round_games.push(record);
    }

    /// Discards the current round's moves.
    pub fn clear_moves(&mut self) {
        self.moves = Round::new();
    }

    /// Discards all completed-round records.
    pub fn clear_history(&mut self) {
        self.history.current_round_games.clear();
    }

    /// Tallies wins and ties by scanning the history.
    pub fn tally(&self) -> Tally {
        self.history
            .current_round_games
            .iter()
            .fold(Tally::default(), |mut tally, record| {
                match record {
                    RoundRecord::Win(PlayerId::One) => tally.player_one_wins += 1,
                    RoundRecord::Win(PlayerId::Two) => tally.player_two_wins += 1,
                    RoundRecord::Draw => tally.ties += 1,
                }
                tally
            })
    }
}
