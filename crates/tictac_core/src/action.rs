//! First-class move attempts, outcomes and errors.
//!
//! Moves are domain events, not side effects. The host inspects the
//! returned [`MoveOutcome`] to decide what to render, play or store.

use super::rules::WinningLine;
use super::Player;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move attempt: a player acting on a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Row-major cell index.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, index: usize) -> Self {
        Self { player, index }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.index)
    }
}

/// A completed move as recorded in round history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: Player,
    /// Cell that received the mark.
    pub to: usize,
    /// Cell vacated by a switch relocation.
    pub from: Option<usize>,
}

/// Result of a move attempt that was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Board mutated, turn passed to the opponent.
    Continued,
    /// Switch variant: piece picked up for relocation, turn unchanged.
    Selected(usize),
    /// The mover completed a line.
    Won {
        /// The winning player.
        player: Player,
        /// Cells forming the line, for highlighting.
        line: WinningLine,
    },
    /// Board full with no line.
    Draw,
}

impl MoveOutcome {
    /// True when the round has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveOutcome::Won { .. } | MoveOutcome::Draw)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            MoveOutcome::Won { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Why an in-bounds move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IllegalMove {
    /// The round has already been won or drawn.
    #[display("Round is already over")]
    RoundOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// The cell holds a mark that cannot be picked up.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// Switch variant: the selected piece belongs to the opponent.
    #[display("Square {} holds an opponent piece", _0)]
    NotYourPiece(usize),

    /// Switch variant: pieces can only be picked up once all three are down.
    #[display("Cannot pick up square {} before placing all pieces", _0)]
    QueueNotFull(usize),

    /// Switch variant: a piece is already in hand.
    #[display("A piece is already selected; place it before touching square {}", _0)]
    RelocationPending(usize),

    /// Switch variant: all pieces are down and none was selected.
    #[display("{} must select a piece to relocate", _0)]
    MustRelocate(Player),
}

impl std::error::Error for IllegalMove {}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Index outside the board.
    #[display("Index {} is outside the board of {} cells", index, cells)]
    InvalidIndex {
        /// The requested index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The move is not allowed in the current state.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMove),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

impl From<IllegalMove> for MoveError {
    fn from(reason: IllegalMove) -> Self {
        MoveError::IllegalMove(reason)
    }
}
