mod action;
mod position;
mod round;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use position::Position;
pub use round::Round;
pub use types::{MismatchedPlayers, OutOfRange, Player, PlayerId, Players, RoundStatus};
