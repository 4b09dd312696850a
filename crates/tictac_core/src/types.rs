//! Core domain types for tic-tac-toe boards of any size.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn occupant(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// Square board of `size * size` cells.
///
/// Cells are stored row-major: `index = row * size + col`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board with the given side length.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Builds a board from row-major squares.
    ///
    /// Returns `None` unless exactly `size * size` squares are supplied.
    #[instrument(skip(squares))]
    pub fn from_squares(size: usize, squares: Vec<Square>) -> Option<Self> {
        (squares.len() == size * size).then_some(Self { size, squares })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    /// Gets the square at the given index.
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Sets the square at the given index.
    pub fn set(&mut self, pos: usize, square: Square) -> Result<(), &'static str> {
        let slot = self.squares.get_mut(pos).ok_or("Position out of bounds")?;
        *slot = square;
        Ok(())
    }

    /// Writes a square at an index already known to be in bounds.
    pub(crate) fn put(&mut self, pos: usize, square: Square) {
        self.squares[pos] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Indices of every empty cell, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of cells holding the given player's mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|sq| **sq == Square::Occupied(player))
            .count()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|sq| **sq != Square::Empty).count()
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|sq| *sq != Square::Empty)
    }

    /// Center cell, rounding toward the top-left on even sizes.
    pub fn center(&self) -> usize {
        let mid = self.size.saturating_sub(1) / 2;
        mid * self.size + mid
    }

    /// Converts an index to `(row, col)`.
    pub fn coords(&self, pos: usize) -> (usize, usize) {
        (pos / self.size, pos % self.size)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number so a terminal player can pick them.
    pub fn display(&self) -> String {
        let width = self.cell_count().to_string().len();
        let divider = vec!["-".repeat(width); self.size].join("+");
        let mut result = String::new();
        for row in 0..self.size {
            let cells: Vec<String> = (0..self.size)
                .map(|col| {
                    let pos = row * self.size + col;
                    let symbol = match self.squares[pos] {
                        Square::Empty => (pos + 1).to_string(),
                        Square::Occupied(player) => player.to_string(),
                    };
                    format!("{:>width$}", symbol)
                })
                .collect();
            result.push_str(&cells.join("|"));
            if row + 1 < self.size {
                result.push('\n');
                result.push_str(&divider);
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4);
        assert_eq!(board.cell_count(), 16);
        assert_eq!(board.empty_cells().len(), 16);
        assert!(!board.is_full());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::new(3);
        assert!(board.set(9, Square::Occupied(Player::X)).is_err());
        assert!(board.set(8, Square::Occupied(Player::X)).is_ok());
        assert_eq!(board.count(Player::X), 1);
    }

    #[test]
    fn test_center() {
        assert_eq!(Board::new(3).center(), 4);
        assert_eq!(Board::new(10).center(), 44);
        assert_eq!(Board::new(5).center(), 12);
    }

    #[test]
    fn test_from_squares_checks_length() {
        assert!(Board::from_squares(3, vec![Square::Empty; 8]).is_none());
        assert!(Board::from_squares(3, vec![Square::Empty; 9]).is_some());
    }

    #[test]
    fn test_display_classic() {
        let mut board = Board::new(3);
        board.set(0, Square::Occupied(Player::X)).unwrap();
        board.set(4, Square::Occupied(Player::O)).unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_display_pads_wide_boards() {
        let board = Board::new(4);
        let first_line = board.display().lines().next().unwrap().to_string();
        assert_eq!(first_line, " 1| 2| 3| 4");
    }
}
