//! Tictac core - rule engine for tic-tac-toe and its variants
//!
//! The engine owns board state and enforces rules; hosts feed it move
//! attempts and render the outcomes it returns.
//!
//! # Architecture
//!
//! - **Round**: one game on one board, mutated only through validated moves
//! - **Rules**: pure win and draw checks shared by the engine and the AI
//! - **AI**: heuristic opponent driven by an injected random source
//! - **Match**: scores, round counter, statistics and preferences
//!
//! # Variants
//!
//! - **Classic**: N x N board, K in a row
//! - **Switch**: at most three pieces each; a fourth move relocates the oldest
//! - **Rapid**: five in a row on 10 x 10
//! - **Guess**: classic rules, scored differently by the host
//!
//! # Example
//!
//! ```
//! use tictac_core::{MatchConfig, MoveOutcome, Player, Round};
//!
//! # fn main() -> Result<(), tictac_core::EngineError> {
//! let mut round = Round::start(&MatchConfig::default())?;
//! for (index, player) in [(0, Player::X), (4, Player::O), (1, Player::X), (5, Player::O)] {
//!     round.attempt_move(index, player)?;
//! }
//! let outcome = round.attempt_move(2, Player::X)?;
//! assert_eq!(outcome.winner(), Some(Player::X));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod ai;
mod config;
mod contracts;
mod error;
mod round;
mod session;
mod types;

pub mod invariants;
pub mod rules;

// Crate-level exports - Board primitives
pub use types::{Board, Player, Square};

// Crate-level exports - Configuration
pub use config::{
    ConfigError, ConfigErrorKind, Difficulty, MatchConfig, Opponent, Variant, MAX_SIZE,
    MIN_SIZE, MIN_WIN_LENGTH, RAPID_SIZE, RAPID_WIN_LENGTH,
};

// Crate-level exports - Moves
pub use action::{IllegalMove, Move, MoveError, MoveOutcome, MoveRecord};

// Crate-level exports - Round engine
pub use round::{PieceQueues, Round, RoundStatus, SwitchState, SWITCH_PIECE_LIMIT};

// Crate-level exports - Contracts
pub use contracts::{
    assert_postconditions, Contract, IndexInBounds, LegalMove, MoveContract, PlayersTurn,
    RoundIsActive,
};

// Crate-level exports - Rules
pub use rules::{check_win_condition, is_draw, Direction, WinningLine};

// Crate-level exports - AI
pub use ai::{
    choose_placement, compute_ai_move, AiMove, RandomSource, RngSource, SequenceSource,
    CENTER_CHANCE, MEDIUM_RANDOM_CHANCE,
};

// Crate-level exports - Match management
pub use session::{
    Match, MatchSnapshot, MatchStats, PlayerNames, Preferences, Scores, Theme, DEFAULT_O_NAME,
    DEFAULT_X_NAME,
};

// Crate-level exports - Errors
pub use error::EngineError;
