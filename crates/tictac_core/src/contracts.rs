//! Contract-based validation for move attempts.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{IllegalMove, Move, MoveError};
use super::invariants::{InvariantSet, RoundInvariants};
use super::round::Round;
use super::Square;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the round has not ended.
pub struct RoundIsActive;

impl RoundIsActive {
    /// Fails with [`IllegalMove::RoundOver`] on a terminal round.
    #[instrument(skip(round))]
    pub fn check(round: &Round) -> Result<(), MoveError> {
        if round.is_active() {
            Ok(())
        } else {
            Err(IllegalMove::RoundOver.into())
        }
    }
}

/// Precondition: the index addresses a board cell.
pub struct IndexInBounds;

impl IndexInBounds {
    /// Fails with [`MoveError::InvalidIndex`] past the last cell.
    #[instrument(skip(round))]
    pub fn check(mov: &Move, round: &Round) -> Result<(), MoveError> {
        let cells = round.board().cell_count();
        if mov.index < cells {
            Ok(())
        } else {
            Err(MoveError::InvalidIndex {
                index: mov.index,
                cells,
            })
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`IllegalMove::WrongPlayer`] for the waiting player.
    #[instrument(skip(round))]
    pub fn check(mov: &Move, round: &Round) -> Result<(), MoveError> {
        if mov.player != round.current_player() {
            Err(IllegalMove::WrongPlayer(mov.player).into())
        } else {
            Ok(())
        }
    }
}

/// Composite precondition shared by every variant.
///
/// Cell legality depends on the variant and is decided by the round itself.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(round))]
    pub fn check(mov: &Move, round: &Round) -> Result<(), MoveError> {
        RoundIsActive::check(round)?;
        IndexInBounds::check(mov, round)?;
        PlayersTurn::check(mov, round)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move attempts.
///
/// Preconditions:
/// - Round is active
/// - Index is on the board
/// - Must be player's turn
///
/// Postconditions:
/// - At most one cell goes from empty to a mark
/// - At most one cell is vacated, and only alongside a fill
/// - All round invariants hold
pub struct MoveContract;

impl Contract<Round, Move> for MoveContract {
    fn pre(round: &Round, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, round)
    }

    fn post(before: &Round, after: &Round) -> Result<(), MoveError> {
        let changes = before
            .board()
            .squares()
            .iter()
            .zip(after.board().squares());
        let (mut filled, mut vacated, mut other) = (0, 0, 0);
        for (old, new) in changes {
            match (old, new) {
                (a, b) if a == b => {}
                (Square::Empty, Square::Occupied(_)) => filled += 1,
                (Square::Occupied(_), Square::Empty) => vacated += 1,
                _ => other += 1,
            }
        }
        if filled > 1 || vacated > filled || other > 0 {
            warn!(filled, vacated, other, "Board changed beyond a single move");
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: {} filled, {} vacated, {} overwritten",
                filled, vacated, other
            )));
        }

        RoundInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Asserts the move postconditions (panic on violation in debug builds).
#[instrument(skip(before, after))]
pub fn assert_postconditions(before: &Round, after: &Round) {
    let result = MoveContract::post(before, after);
    debug_assert!(result.is_ok(), "{:?}", result);
}
