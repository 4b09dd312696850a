//! AI controller backed by the engine's heuristic.

use super::{Controller, Turn, from_result};
use anyhow::Result;
use std::io::Write;
use tictac_core::{Match, RandomSource};
use tracing::debug;

/// Plays whichever side is to move using the match difficulty.
pub struct AiController<S> {
    rng: S,
}

impl<S: RandomSource> AiController<S> {
    /// Creates an AI drawing from `rng`.
    pub fn new(rng: S) -> Self {
        Self { rng }
    }
}

impl<S: RandomSource> Controller for AiController<S> {
    fn take_turn(&mut self, game: &mut Match, out: &mut dyn Write) -> Result<Turn> {
        let mark = game.round().current_player();
        let name = game.preferences().player_names.name(mark).to_string();
        let turn = from_result(game.play_ai_turn(&mut self.rng));
        if let Some(record) = game.round().history().last()
            && matches!(turn, Turn::Moved(_))
        {
            debug!(difficulty = %game.config().difficulty, to = record.to, "AI moved");
            match record.from {
                Some(from) => writeln!(out, "{} moves {} -> {}", name, from + 1, record.to + 1)?,
                None => writeln!(out, "{} plays {}", name, record.to + 1)?,
            }
        }
        Ok(turn)
    }

    fn label(&self) -> &str {
        "ai"
    }
}
