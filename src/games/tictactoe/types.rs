//! Core domain types for tic-tac-toe.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identifier of one of the two seats at the board.
///
/// Serialized as the bare integer `1` or `2`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerId {
    /// Player 1 (moves first).
    #[display("1")]
    One,
    /// Player 2 (moves second).
    #[display("2")]
    Two,
}

impl PlayerId {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Returns the numeric id (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

/// A numeric id that does not name a player or square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("{} {} is out of range", kind, value)]
pub struct OutOfRange {
    /// What was being parsed.
    pub kind: &'static str,
    /// The rejected value.
    pub value: u8,
}

impl TryFrom<u8> for PlayerId {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            _ => Err(OutOfRange {
                kind: "player id",
                value,
            }),
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        id.number()
    }
}

/// Static presentation configuration for a player.
///
/// Not part of the persisted state; views use the classes to pick icons
/// and colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Player {
    /// Seat this configuration belongs to.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Icon hint for the view.
    icon_class: String,
    /// Color hint for the view.
    color_class: String,
}

/// Both players of a session, indexed by [`PlayerId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    one: Player,
    two: Player,
}

/// Player configuration that does not cover both seats exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("expected players 1 and 2, got {:?} and {:?}", first, second)]
pub struct MismatchedPlayers {
    /// Id of the first supplied player.
    pub first: PlayerId,
    /// Id of the second supplied player.
    pub second: PlayerId,
}

impl Players {
    /// Pairs two player configurations, in either order.
    ///
    /// # Errors
    ///
    /// Returns [`MismatchedPlayers`] if both configurations claim the same seat.
    #[instrument(skip(a, b), fields(first = %a.id, second = %b.id))]
    pub fn try_new(a: Player, b: Player) -> Result<Self, MismatchedPlayers> {
        match (a.id, b.id) {
            (PlayerId::One, PlayerId::Two) => Ok(Self { one: a, two: b }),
            (PlayerId::Two, PlayerId::One) => Ok(Self { one: b, two: a }),
            (first, second) => Err(MismatchedPlayers { first, second }),
        }
    }

    /// Returns the configuration for a seat.
    pub fn get(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.one,
            PlayerId::Two => &self.two,
        }
    }

    /// Iterates players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        [&self.one, &self.two].into_iter()
    }
}

impl Default for Players {
    fn default() -> Self {
        Self {
            one: Player::new(
                PlayerId::One,
                "Player 1".to_string(),
                "fa-x".to_string(),
                "turquoise".to_string(),
            ),
            two: Player::new(
                PlayerId::Two,
                "Player 2".to_string(),
                "fa-o".to_string(),
                "yellow".to_string(),
            ),
        }
    }
}

/// Status of a round, derived from its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundStatus {
    /// Whether the round is over (win or full board).
    pub is_complete: bool,
    /// The winning seat, if any.
    pub winner: Option<PlayerId>,
}

impl RoundStatus {
    /// True when the round finished without a winner.
    pub fn is_draw(&self) -> bool {
        self.is_complete && self.winner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_opponent() {
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.opponent(), PlayerId::One);
    }

    #[test]
    fn test_player_id_from_u8() {
        assert_eq!(PlayerId::try_from(1u8), Ok(PlayerId::One));
        assert_eq!(PlayerId::try_from(2u8), Ok(PlayerId::Two));
        assert!(PlayerId::try_from(0u8).is_err());
        assert!(PlayerId::try_from(3u8).is_err());
    }

    #[test]
    fn test_player_id_serializes_as_integer() {
        let json = serde_json::to_string(&PlayerId::Two).unwrap();
        assert_eq!(json, "2");
        let parsed: PlayerId = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, PlayerId::One);
        assert!(serde_json::from_str::<PlayerId>("7").is_err());
    }

    #[test]
    fn test_players_accepts_either_order() {
        let defaults = Players::default();
        let swapped = Players::try_new(
            defaults.get(PlayerId::Two).clone(),
            defaults.get(PlayerId::One).clone(),
        )
        .unwrap();
        assert_eq!(swapped, defaults);
    }

    #[test]
    fn test_players_rejects_duplicate_seat() {
        let defaults = Players::default();
        let result = Players::try_new(
            defaults.get(PlayerId::One).clone(),
            defaults.get(PlayerId::One).clone(),
        );
        assert!(result.is_err());
    }
}
