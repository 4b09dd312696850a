//! Controllers that act for a side of the board.

mod ai;
mod human;

pub use ai::AiController;
pub use human::HumanController;

use anyhow::Result;
use std::io::Write;
use tictac_core::{Match, MoveError, MoveOutcome};

/// Something a controller did with its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// The engine accepted a move.
    Moved(MoveOutcome),
    /// The engine refused a move; the round is unchanged.
    Rejected(MoveError),
    /// A menu command instead of a move.
    Command(MenuCommand),
}

/// Match-level commands a human can issue between moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Start the next round, keeping scores.
    NextRound,
    /// Zero the scores and start over.
    NewMatch,
    /// Turn sound effects on or off.
    ToggleSound,
    /// Switch between dark and light colours.
    ToggleTheme,
    /// Save and leave.
    Quit,
}

/// Trait for anything that can take a turn in a match.
pub trait Controller {
    /// Acts once for the player to move.
    ///
    /// Prompts, if any, go to `out`.
    fn take_turn(&mut self, game: &mut Match, out: &mut dyn Write) -> Result<Turn>;

    /// Returns a label for logs.
    fn label(&self) -> &str;
}

fn from_result(result: Result<MoveOutcome, MoveError>) -> Turn {
    match result {
        Ok(outcome) => Turn::Moved(outcome),
        Err(e) => Turn::Rejected(e),
    }
}
