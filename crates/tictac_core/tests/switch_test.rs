//! Tests for the switch variant's relocation queue.

use tictac_core::{
    compute_ai_move, Difficulty, IllegalMove, MatchConfig, MoveError, MoveOutcome, MoveRecord,
    Player, Round, RngSource, Square, Variant, SWITCH_PIECE_LIMIT,
};

fn switch_round() -> Round {
    Round::start(&MatchConfig::for_variant(Variant::Switch)).unwrap()
}

/// X at 0, 1, 5 and O at 4, 7, 6: both queues full, X to move.
fn full_queues() -> Round {
    let mut round = switch_round();
    for (index, player) in [
        (0, Player::X),
        (4, Player::O),
        (1, Player::X),
        (7, Player::O),
        (5, Player::X),
        (6, Player::O),
    ] {
        assert_eq!(
            round.attempt_move(index, player).unwrap(),
            MoveOutcome::Continued
        );
    }
    round
}

#[test]
fn test_relocation_flow() {
    let mut round = full_queues();
    assert_eq!(round.queue(Player::X), &[0, 1, 5]);

    assert_eq!(
        round.attempt_move(3, Player::X),
        Err(MoveError::IllegalMove(IllegalMove::MustRelocate(Player::X)))
    );

    assert_eq!(round.attempt_move(0, Player::X), Ok(MoveOutcome::Selected(0)));
    assert_eq!(round.current_player(), Player::X);
    assert_eq!(round.pending_relocation(), Some(0));

    assert_eq!(round.attempt_move(3, Player::X), Ok(MoveOutcome::Continued));
    let board = round.board();
    assert_eq!(board.get(0), Some(Square::Empty));
    for cell in [1, 3, 5] {
        assert_eq!(board.get(cell), Some(Square::Occupied(Player::X)));
    }
    assert_eq!(round.queue(Player::X), &[1, 5, 3]);
    assert_eq!(round.pending_relocation(), None);
    assert_eq!(round.current_player(), Player::O);
    assert_eq!(
        round.history().last(),
        Some(&MoveRecord::new(Player::X, 3, Some(0)))
    );
}

#[test]
fn test_selection_rules() {
    let mut round = switch_round();
    round.attempt_move(0, Player::X).unwrap();
    round.attempt_move(4, Player::O).unwrap();

    // Picking up before all three pieces are down.
    assert_eq!(
        round.attempt_move(0, Player::X),
        Err(MoveError::IllegalMove(IllegalMove::QueueNotFull(0)))
    );
    // Opponent pieces are never selectable.
    assert_eq!(
        round.attempt_move(4, Player::X),
        Err(MoveError::IllegalMove(IllegalMove::NotYourPiece(4)))
    );

    let mut round = full_queues();
    round.attempt_move(1, Player::X).unwrap();
    let before = round.clone();
    assert_eq!(
        round.attempt_move(5, Player::X),
        Err(MoveError::IllegalMove(IllegalMove::RelocationPending(5)))
    );
    assert_eq!(round, before);
}

#[test]
fn test_relocation_can_win() {
    let mut round = full_queues();
    // X holds 0, 1, 5; moving 5 to 2 completes the top row.
    round.attempt_move(5, Player::X).unwrap();
    match round.attempt_move(2, Player::X).unwrap() {
        MoveOutcome::Won { player, line } => {
            assert_eq!(player, Player::X);
            assert_eq!(line.cells(), &[0, 1, 2]);
        }
        other => panic!("Expected a win, got {:?}", other),
    }
}

#[test]
fn test_queue_bound_holds_under_random_play() {
    for seed in 0..20 {
        let mut round = switch_round();
        let mut rng = RngSource::seeded(seed);

        for _ in 0..200 {
            if !round.is_active() {
                break;
            }
            let mark = round.current_player();
            let ai_move = compute_ai_move(&round, Difficulty::Easy, &mut rng)
                .expect("switch always has a free cell");
            if let Some(from) = ai_move.relocate_from {
                assert_eq!(
                    round.attempt_move(from, mark),
                    Ok(MoveOutcome::Selected(from))
                );
            }
            let outcome = round.attempt_move(ai_move.to, mark).unwrap();
            assert_ne!(outcome, MoveOutcome::Draw, "switch never draws");

            for player in [Player::X, Player::O] {
                let queue = round.queue(player);
                assert!(queue.len() <= SWITCH_PIECE_LIMIT);
                assert_eq!(queue.len(), round.board().count(player));
            }
        }
    }
}
