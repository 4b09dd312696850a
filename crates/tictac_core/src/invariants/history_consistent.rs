//! History consistency invariant: replaying history reproduces the board.

use super::super::{Board, Round, Square};
use super::Invariant;

/// Invariant: The board is exactly what the move history produces.
///
/// Every placement lands on an empty cell, every relocation lifts the
/// mover's own piece, and the move counter matches the history length.
pub struct HistoryConsistentInvariant;

impl Invariant<Round> for HistoryConsistentInvariant {
    fn holds(round: &Round) -> bool {
        if round.history().len() != round.move_count() {
            return false;
        }

        let mut reconstructed = Board::new(round.board().size());
        for record in round.history() {
            if let Some(from) = record.from {
                if reconstructed.get(from) != Some(Square::Occupied(record.player)) {
                    return false;
                }
                reconstructed.put(from, Square::Empty);
            }
            if !reconstructed.is_empty(record.to) {
                return false;
            }
            reconstructed.put(record.to, Square::Occupied(record.player));
        }

        reconstructed == *round.board()
    }

    fn description() -> &'static str {
        "Board matches the replayed move history"
    }
}
