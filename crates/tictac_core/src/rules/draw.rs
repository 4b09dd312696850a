//! Draw detection logic.

use super::super::{Board, Square, Variant};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Draw check, to be called only after the last move failed to win.
///
/// The switch variant never draws: pieces are always recyclable.
#[instrument(skip(board))]
pub fn is_draw(board: &Board, variant: Variant) -> bool {
    variant.allows_draw() && is_full(board)
}
