//! Plain-text rendering of the game for terminals.

use std::io::Write;

use tracing::warn;

use crate::controller::View;
use crate::games::tictactoe::{PlayerId, Position};
use crate::store::{GameView, StatsView};

/// Renders the board and scoreboard as text into a writer.
#[derive(Debug)]
pub struct TextView<W> {
    out: W,
    renders: usize,
}

impl<W: Write> TextView<W> {
    /// Creates a view writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, renders: 0 }
    }

    /// Number of completed renders.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn mark(id: PlayerId) -> char {
    match id {
        PlayerId::One => 'X',
        PlayerId::Two => 'O',
    }
}

/// Formats the board as a human-readable grid; free squares show their id.
pub fn board_text(game: &GameView) -> String {
    let mut result = String::new();
    for (i, pos) in Position::ALL.iter().enumerate() {
        let symbol = game
            .moves()
            .iter()
            .find(|m| m.square_id() == *pos)
            .map_or_else(|| pos.square_id().to_string(), |m| mark(m.player_id()).to_string());
        result.push_str(&symbol);
        match i % 3 {
            2 if i < 8 => result.push_str("\n-+-+-\n"),
            2 => {}
            _ => result.push('|'),
        }
    }
    result
}

/// One-line status: whose turn, or how the round ended.
pub fn status_line(game: &GameView) -> String {
    match (game.status().is_complete(), game.status().winner()) {
        (true, Some(winner)) => format!("{} wins!", winner.name()),
        (true, None) => "It's a draw!".to_string(),
        (false, _) => format!("{}, you're up!", game.current_player().name()),
    }
}

/// One-line scoreboard.
pub fn stats_line(stats: &StatsView) -> String {
    let mut parts: Vec<String> = stats
        .player_with_stats()
        .iter()
        .map(|p| format!("{} ({}): {} wins", p.player().name(), mark(*p.player().id()), p.wins()))
        .collect();
    parts.push(format!("Ties: {}", stats.ties()));
    parts.join(" | ")
}

impl<W: Write> View for TextView<W> {
    fn render(&mut self, game: &GameView, stats: &StatsView) {
        let text = format!(
            "{}\n\n{}\n{}\n",
            board_text(game),
            status_line(game),
            stats_line(stats)
        );
        match self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
        {
            Ok(()) => self.renders += 1,
            Err(e) => warn!(error = %e, "Failed to render"),
        }
    }
}
