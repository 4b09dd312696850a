//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{Player, Round};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// Move history must show X, O, X, O, ... pattern starting with X.
/// While the round is active the next player follows the pattern;
/// once it ends the last mover stays current.
pub struct AlternatingTurnInvariant;

impl Invariant<Round> for AlternatingTurnInvariant {
    fn holds(round: &Round) -> bool {
        let history = round.history();

        if let Some(first) = history.first()
            && first.player != Player::X
        {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        let expected = if round.is_active() {
            if history.len() % 2 == 0 {
                Player::X
            } else {
                Player::O
            }
        } else {
            match history.last() {
                Some(last) => last.player,
                None => return false,
            }
        };

        round.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
