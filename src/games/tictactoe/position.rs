//! Position enum for tic-tac-toe squares.

use super::types::OutOfRange;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A square on the tic-tac-toe board.
///
/// Squares are numbered 1-9 in row-major order, which is also how they are
/// serialized and how views refer to them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    /// Top-left (square 1)
    TopLeft,
    /// Top-center (square 2)
    TopCenter,
    /// Top-right (square 3)
    TopRight,
    /// Middle-left (square 4)
    MiddleLeft,
    /// Center (square 5)
    Center,
    /// Middle-right (square 6)
    MiddleRight,
    /// Bottom-left (square 7)
    BottomLeft,
    /// Bottom-center (square 8)
    BottomCenter,
    /// Bottom-right (square 9)
    BottomRight,
}

impl Position {
    /// All 9 positions.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to its square id (1-9).
    pub fn square_id(self) -> u8 {
        match self {
            Position::TopLeft => 1,
            Position::TopCenter => 2,
            Position::TopRight => 3,
            Position::MiddleLeft => 4,
            Position::Center => 5,
            Position::MiddleRight => 6,
            Position::BottomLeft => 7,
            Position::BottomCenter => 8,
            Position::BottomRight => 9,
        }
    }

    /// Creates position from a square id (1-9).
    #[instrument]
    pub fn from_square_id(square_id: u8) -> Option<Self> {
        match square_id {
            1..=9 => Some(Self::ALL[usize::from(square_id - 1)]),
            _ => None,
        }
    }

    /// Parse from a square id or a label (case-insensitive).
    #[instrument]
    pub fn parse(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(num) = s.parse::<u8>() {
            return Self::from_square_id(num);
        }

        let s_lower = s.to_lowercase();
        <Position as strum::IntoEnumIterator>::iter()
            .find(|pos| pos.label().to_lowercase() == s_lower)
    }
}

impl TryFrom<u8> for Position {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_square_id(value).ok_or(OutOfRange {
            kind: "square id",
            value,
        })
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> Self {
        pos.square_id()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_ids_are_row_major() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(usize::from(pos.square_id()), i + 1);
            assert_eq!(Position::from_square_id(pos.square_id()), Some(*pos));
        }
    }

    #[test]
    fn test_from_square_id_out_of_range() {
        assert_eq!(Position::from_square_id(0), None);
        assert_eq!(Position::from_square_id(10), None);
        assert_eq!(Position::from_square_id(255), None);
    }

    #[test]
    fn test_parse_number_or_label() {
        assert_eq!(Position::parse("5"), Some(Position::Center));
        assert_eq!(Position::parse(" 9 "), Some(Position::BottomRight));
        assert_eq!(Position::parse("top-left"), Some(Position::TopLeft));
        assert_eq!(Position::parse("nowhere"), None);
        assert_eq!(Position::parse("0"), None);
    }

    #[test]
    fn test_serializes_as_square_id() {
        assert_eq!(serde_json::to_string(&Position::MiddleLeft).unwrap(), "4");
        assert!(serde_json::from_str::<Position>("10").is_err());
    }
}
