//! Win detection for boards of any size and win length.

use super::super::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// The eight lines of a 3x3 board: rows, columns, diagonals.
#[rustfmt::skip]
pub const CLASSIC_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],             // Diagonals
];

/// Direction a line runs in, in scan order.
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
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Direction {
    /// `(row, col)` step for one cell along the line.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// A completed line of identical marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    cells: Vec<usize>,
    direction: Direction,
    size: usize,
}

impl WinningLine {
    /// Cell indices in walk order.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Direction of the line.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Human-readable pattern name, e.g. "Top Row" or "Column 4".
    pub fn pattern_name(&self) -> String {
        let start = self.cells.first().copied().unwrap_or_default();
        let (row, col) = (start / self.size, start % self.size);
        if self.size == 3 {
            const ROWS: [&str; 3] = ["Top Row", "Middle Row", "Bottom Row"];
            const COLUMNS: [&str; 3] = ["Left Column", "Middle Column", "Right Column"];
            return match self.direction {
                Direction::Horizontal => ROWS[row].to_string(),
                Direction::Vertical => COLUMNS[col].to_string(),
                Direction::Diagonal => "Main Diagonal".to_string(),
                Direction::AntiDiagonal => "Anti Diagonal".to_string(),
            };
        }
        match self.direction {
            Direction::Horizontal => format!("Row {}", row + 1),
            Direction::Vertical => format!("Column {}", col + 1),
            Direction::Diagonal => "Diagonal".to_string(),
            Direction::AntiDiagonal => "Anti Diagonal".to_string(),
        }
    }
}

/// Checks whether the mark at `last_placed` forms a winning line.
///
/// Every cell holding that mark is tried as a line start, in index order,
/// walking each [`Direction`] in turn. The first run of exactly `win_length`
/// matching cells is returned.
#[instrument(skip(board))]
pub fn check_win_condition(
    board: &Board,
    win_length: usize,
    last_placed: usize,
) -> Option<WinningLine> {
    let player = board.get(last_placed)?.occupant()?;
    find_line(board, win_length, player)
}

/// Finds the first winning line for `player`, if any.
#[instrument(skip(board))]
pub fn find_line(board: &Board, win_length: usize, player: Player) -> Option<WinningLine> {
    let mark = Square::Occupied(player);
    for start in 0..board.cell_count() {
        if board.get(start) != Some(mark) {
            continue;
        }
        for direction in Direction::iter() {
            if let Some(cells) = walk(board, start, direction, win_length, mark) {
                return Some(WinningLine {
                    cells,
                    direction,
                    size: board.size(),
                });
            }
        }
    }
    None
}

/// Walks `len` cells from `start`; aborts on leaving the grid or a mismatch.
fn walk(
    board: &Board,
    start: usize,
    direction: Direction,
    len: usize,
    mark: Square,
) -> Option<Vec<usize>> {
    let size = board.size() as isize;
    let (row, col) = board.coords(start);
    let (dr, dc) = direction.delta();
    let mut cells = Vec::with_capacity(len);
    for step in 0..len as isize {
        let r = row as isize + dr * step;
        let c = col as isize + dc * step;
        if r < 0 || r >= size || c < 0 || c >= size {
            return None;
        }
        let idx = (r * size + c) as usize;
        if board.get(idx) != Some(mark) {
            return None;
        }
        cells.push(idx);
    }
    Some(cells)
}

/// Would placing `player` at `cell` complete one of the [`CLASSIC_LINES`]?
///
/// Only meaningful on a 3x3 board.
pub fn completes_classic_line(board: &Board, cell: usize, player: Player) -> bool {
    let mark = Some(Square::Occupied(player));
    CLASSIC_LINES
        .iter()
        .filter(|line| line.contains(&cell))
        .any(|line| line.iter().all(|&i| i == cell || board.get(i) == mark))
}
