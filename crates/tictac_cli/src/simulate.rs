//! Headless AI-versus-AI matches.

use anyhow::Result;
use tictac_core::{Match, MatchConfig, Preferences, RandomSource};
use tracing::{info, instrument, warn};

/// Moves after which a round is abandoned; switch rounds can cycle forever.
pub const MAX_MOVES_PER_ROUND: usize = 500;

/// Totals from a simulated match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationReport {
    /// Rounds won by X.
    pub x_wins: u32,
    /// Rounds won by O.
    pub o_wins: u32,
    /// Rounds that filled the board.
    pub draws: u32,
    /// Rounds stopped at the move cap.
    pub abandoned: u32,
    /// Moves across all rounds.
    pub total_moves: u32,
}

/// Plays `rounds` rounds with the AI on both sides.
#[instrument(skip(rng))]
pub fn simulate(
    config: MatchConfig,
    rounds: u32,
    rng: &mut impl RandomSource,
) -> Result<SimulationReport> {
    let mut game = Match::new(config, Preferences::default())?;
    let mut abandoned = 0;

    for round in 0..rounds {
        if round > 0 {
            game.next_round();
        }
        while game.round().is_active() && game.round().move_count() < MAX_MOVES_PER_ROUND {
            game.play_ai_turn(rng)?;
        }
        if game.round().is_active() {
            warn!(round = game.round_number(), "Round abandoned at move cap");
            abandoned += 1;
        }
    }

    let stats = game.stats();
    let report = SimulationReport {
        x_wins: game.scores().x,
        o_wins: game.scores().o,
        draws: stats.games_played - game.scores().x - game.scores().o,
        abandoned,
        total_moves: stats.total_moves,
    };
    info!(?report, "Simulation finished");
    Ok(report)
}
