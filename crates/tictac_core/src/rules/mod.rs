//! Game rules.
//!
//! This module contains pure functions for evaluating board state.
//! Rules are separated from round storage so the AI can test
//! hypothetical boards with the same checks the engine uses.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{
    check_win_condition, completes_classic_line, find_line, Direction, WinningLine,
    CLASSIC_LINES,
};
