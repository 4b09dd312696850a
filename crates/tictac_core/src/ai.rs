//! Heuristic AI opponent.
//!
//! The policy is deliberately shallow: a one-ply win/block check on 3x3
//! boards, center-or-random elsewhere. All randomness comes from an
//! injected [`RandomSource`] so selection is reproducible.

use super::config::{Difficulty, Variant};
use super::round::{Round, SWITCH_PIECE_LIMIT};
use super::rules::completes_classic_line;
use super::{Board, Player, Square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Chance that a medium AI ignores the hard policy and plays randomly.
pub const MEDIUM_RANDOM_CHANCE: f64 = 0.6;
/// Chance that the weak policy takes the center when it is free.
pub const CENTER_CHANCE: f64 = 0.5;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

impl RngSource<StdRng> {
    /// Reproducible source from a seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// An empty list always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f64>,
    next: usize,
}

impl SequenceSource {
    /// Creates a source replaying `values` in order.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// A move chosen by the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AiMove {
    /// Switch variant: the piece to pick up first.
    pub relocate_from: Option<usize>,
    /// Destination cell.
    pub to: usize,
}

/// Chooses a move for the player to act in `round`.
///
/// Returns `None` on a finished round or when no cell is available.
#[instrument(skip(round, rng), fields(variant = %round.config().variant))]
pub fn compute_ai_move(
    round: &Round,
    difficulty: Difficulty,
    rng: &mut impl RandomSource,
) -> Option<AiMove> {
    if !round.is_active() {
        return None;
    }
    let mark = round.current_player();
    let variant = round.config().variant;

    if variant.is_switch() {
        let queue = round.queue(mark);
        let origin = round
            .pending_relocation()
            .or_else(|| (queue.len() >= SWITCH_PIECE_LIMIT).then(|| queue[0]));
        if let Some(from) = origin {
            let mut lifted = round.board().clone();
            lifted.put(from, Square::Empty);
            let candidates: Vec<usize> = lifted
                .empty_cells()
                .into_iter()
                .filter(|&cell| cell != from)
                .collect();
            let to = select_cell(&lifted, &candidates, mark, difficulty, variant, rng)?;
            debug!(from, to, "AI relocates piece");
            return Some(AiMove {
                relocate_from: Some(from),
                to,
            });
        }
    }

    let to = choose_placement(round.board(), mark, difficulty, variant, rng)?;
    debug!(to, "AI places piece");
    Some(AiMove {
        relocate_from: None,
        to,
    })
}

/// Picks an empty cell for `mark` under the given policy.
#[instrument(skip(board, rng))]
pub fn choose_placement(
    board: &Board,
    mark: Player,
    difficulty: Difficulty,
    variant: Variant,
    rng: &mut impl RandomSource,
) -> Option<usize> {
    let candidates = board.empty_cells();
    select_cell(board, &candidates, mark, difficulty, variant, rng)
}

fn select_cell(
    board: &Board,
    candidates: &[usize],
    mark: Player,
    difficulty: Difficulty,
    variant: Variant,
    rng: &mut impl RandomSource,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    if variant == Variant::Rapid {
        return Some(center_or_random(board, candidates, rng));
    }
    // The win/block check only knows the eight 3x3 lines.
    let classic_geometry = board.size() == 3;
    let cell = match difficulty {
        Difficulty::Easy => pick_uniform(candidates, rng),
        _ if !classic_geometry => center_or_random(board, candidates, rng),
        Difficulty::Medium if rng.next_f64() < MEDIUM_RANDOM_CHANCE => {
            pick_uniform(candidates, rng)
        }
        Difficulty::Medium | Difficulty::Hard => win_block_or_random(board, candidates, mark, rng),
    };
    Some(cell)
}

/// Take a winning cell, else block the opponent, else play randomly.
fn win_block_or_random(
    board: &Board,
    candidates: &[usize],
    mark: Player,
    rng: &mut impl RandomSource,
) -> usize {
    let winning = candidates
        .iter()
        .copied()
        .find(|&cell| completes_classic_line(board, cell, mark));
    if let Some(cell) = winning {
        debug!(cell, "AI takes winning cell");
        return cell;
    }

    let blocking = candidates
        .iter()
        .copied()
        .find(|&cell| completes_classic_line(board, cell, mark.opponent()));
    if let Some(cell) = blocking {
        debug!(cell, "AI blocks opponent");
        return cell;
    }

    pick_uniform(candidates, rng)
}

fn center_or_random(board: &Board, candidates: &[usize], rng: &mut impl RandomSource) -> usize {
    let center = board.center();
    if rng.next_f64() < CENTER_CHANCE && candidates.contains(&center) {
        center
    } else {
        pick_uniform(candidates, rng)
    }
}

/// One draw, scaled onto the candidate list. `candidates` must be non-empty.
fn pick_uniform(candidates: &[usize], rng: &mut impl RandomSource) -> usize {
    let scaled = (rng.next_f64() * candidates.len() as f64).floor() as usize;
    candidates[scaled.min(candidates.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(layout: &str) -> Board {
        let squares = layout
            .chars()
            .map(|c| match c {
                'X' => Square::Occupied(Player::X),
                'O' => Square::Occupied(Player::O),
                _ => Square::Empty,
            })
            .collect::<Vec<_>>();
        let size = (squares.len() as f64).sqrt() as usize;
        Board::from_squares(size, squares).unwrap()
    }

    #[test]
    fn test_hard_prefers_own_win_over_block() {
        let board = board_from("XX_OO____");
        let mut rng = SequenceSource::new([0.99]);
        let cell =
            choose_placement(&board, Player::O, Difficulty::Hard, Variant::Classic, &mut rng);
        assert_eq!(cell, Some(5));
    }

    #[test]
    fn test_hard_blocks() {
        let board = board_from("XX__O____");
        let mut rng = SequenceSource::new([0.99]);
        let cell =
            choose_placement(&board, Player::O, Difficulty::Hard, Variant::Classic, &mut rng);
        assert_eq!(cell, Some(2));
    }

    #[test]
    fn test_hard_random_fallback_uses_draw() {
        let board = board_from("X________");
        // Eight candidates: 1..=8. A draw of 0.5 picks the fifth one.
        let mut rng = SequenceSource::new([0.5]);
        let cell = choose_placement(&board, Player::O, Difficulty::Hard, Variant::Guess, &mut rng);
        assert_eq!(cell, Some(5));
    }

    #[test]
    fn test_medium_random_branch() {
        let board = board_from("XX_OO____");
        // 0.1 < 0.6 takes the random branch; 0.0 then picks the first empty cell.
        let mut rng = SequenceSource::new([0.1, 0.0]);
        let cell =
            choose_placement(&board, Player::O, Difficulty::Medium, Variant::Classic, &mut rng);
        assert_eq!(cell, Some(2));
    }

    #[test]
    fn test_medium_hard_branch() {
        let board = board_from("XX_OO____");
        let mut rng = SequenceSource::new([0.7]);
        let cell =
            choose_placement(&board, Player::O, Difficulty::Medium, Variant::Classic, &mut rng);
        assert_eq!(cell, Some(5));
    }

    #[test]
    fn test_easy_ignores_wins() {
        let board = board_from("XX_OO____");
        let mut rng = SequenceSource::new([0.0]);
        let cell =
            choose_placement(&board, Player::O, Difficulty::Easy, Variant::Classic, &mut rng);
        assert_eq!(cell, Some(2));
    }

    #[test]
    fn test_rapid_center_when_draw_low() {
        let board = Board::new(10);
        let mut rng = SequenceSource::new([0.3]);
        let cell = choose_placement(&board, Player::O, Difficulty::Hard, Variant::Rapid, &mut rng);
        assert_eq!(cell, Some(44));
    }

    #[test]
    fn test_rapid_random_when_draw_high() {
        let board = Board::new(10);
        let mut rng = SequenceSource::new([0.7, 0.0]);
        let cell = choose_placement(&board, Player::O, Difficulty::Hard, Variant::Rapid, &mut rng);
        assert_eq!(cell, Some(0));
    }

    #[test]
    fn test_hard_on_large_classic_board_falls_back() {
        // On 4x4 the 3x3 table would wrongly see 0,1,2 as a line.
        let board = board_from("OO______________");
        let mut rng = SequenceSource::new([0.2]);
        let cell =
            choose_placement(&board, Player::O, Difficulty::Hard, Variant::Classic, &mut rng);
        assert_eq!(cell, Some(board.center()));
    }

    #[test]
    fn test_no_candidates() {
        let board = board_from("XOXXOOOXX");
        let mut rng = SequenceSource::new([0.5]);
        assert_eq!(
            choose_placement(&board, Player::O, Difficulty::Hard, Variant::Classic, &mut rng),
            None
        );
    }

    #[test]
    fn test_sequence_source_cycles() {
        let mut rng = SequenceSource::new([0.1, 0.2]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.2);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(SequenceSource::default().next_f64(), 0.0);
    }

    #[test]
    fn test_seeded_source_in_range() {
        let mut rng = RngSource::seeded(7);
        for _ in 0..100 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
