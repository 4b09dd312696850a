//! Queue bound invariant for the switch variant.

use super::super::round::SWITCH_PIECE_LIMIT;
use super::super::{Player, Round, Square};
use super::Invariant;
use strum::IntoEnumIterator;

/// Invariant: Each switch queue holds at most three pieces and mirrors the board.
///
/// Every queued cell carries its owner's mark, the owner has no unqueued
/// marks, and a pending relocation points at one of the mover's pieces.
/// Rounds outside the switch variant hold trivially.
pub struct QueueBoundInvariant;

impl Invariant<Round> for QueueBoundInvariant {
    fn holds(round: &Round) -> bool {
        let Some(switch) = round.switch_state() else {
            return true;
        };
        let board = round.board();

        let queues_ok = Player::iter().all(|player| {
            let queue = switch.queues().get(player);
            queue.len() <= SWITCH_PIECE_LIMIT
                && queue.len() == board.count(player)
                && queue
                    .iter()
                    .all(|&cell| board.get(cell) == Some(Square::Occupied(player)))
        });

        let pending_ok = switch.pending_relocation().is_none_or(|cell| {
            switch.queues().get(round.current_player()).contains(&cell)
        });

        queues_ok && pending_ok
    }

    fn description() -> &'static str {
        "Switch queues hold at most three pieces matching the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MatchConfig, Variant};

    fn switch_round() -> Round {
        Round::start(&MatchConfig::for_variant(Variant::Switch)).unwrap()
    }

    #[test]
    fn test_classic_round_holds() {
        let mut round = Round::start(&MatchConfig::default()).unwrap();
        round.attempt_move(0, Player::X).unwrap();
        assert!(QueueBoundInvariant::holds(&round));
    }

    #[test]
    fn test_full_queues_hold() {
        let mut round = switch_round();
        for (idx, player) in [
            (0, Player::X),
            (3, Player::O),
            (1, Player::X),
            (4, Player::O),
            (8, Player::X),
            (7, Player::O),
        ] {
            round.attempt_move(idx, player).unwrap();
        }
        assert!(QueueBoundInvariant::holds(&round));
    }

    #[test]
    fn test_fourth_piece_violates() {
        let mut round = switch_round();
        for (idx, player) in [
            (0, Player::X),
            (3, Player::O),
            (1, Player::X),
            (4, Player::O),
            (8, Player::X),
            (7, Player::O),
        ] {
            round.attempt_move(idx, player).unwrap();
        }
        if let Some(switch) = round.switch.as_mut() {
            switch.queues.get_mut(Player::X).push(5);
        }
        round.board.put(5, Square::Occupied(Player::X));
        assert!(!QueueBoundInvariant::holds(&round));
    }

    #[test]
    fn test_untracked_mark_violates() {
        let mut round = switch_round();
        round.attempt_move(0, Player::X).unwrap();
        round.board.put(6, Square::Occupied(Player::X));
        assert!(!QueueBoundInvariant::holds(&round));
    }
}
