//! Round state machine: move validation, variant rules and terminal detection.

use super::action::{IllegalMove, Move, MoveError, MoveOutcome, MoveRecord};
use super::config::{ConfigError, MatchConfig};
#[cfg(debug_assertions)]
use super::contracts::assert_postconditions;
use super::contracts::{Contract, MoveContract};
use super::error::EngineError;
use super::rules::{check_win_condition, is_draw, WinningLine};
use super::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Live pieces each player may hold in the switch variant.
pub const SWITCH_PIECE_LIMIT: usize = 3;

/// Per-player placement order in the switch variant, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceQueues {
    x: Vec<usize>,
    o: Vec<usize>,
}

impl PieceQueues {
    /// The player's live pieces, oldest first.
    pub fn get(&self, player: Player) -> &[usize] {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    pub(crate) fn get_mut(&mut self, player: Player) -> &mut Vec<usize> {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }
}

/// Switch-variant bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchState {
    pub(crate) queues: PieceQueues,
    pub(crate) pending_relocation: Option<usize>,
}

impl SwitchState {
    /// Both players' piece queues.
    pub fn queues(&self) -> &PieceQueues {
        &self.queues
    }

    /// The piece currently picked up, if any.
    pub fn pending_relocation(&self) -> Option<usize> {
        self.pending_relocation
    }
}

/// Where a round stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Moves are accepted.
    Active,
    /// A player completed a line.
    Won {
        /// The winner.
        player: Player,
        /// The completed line.
        line: WinningLine,
    },
    /// Board filled with no line.
    Draw,
}

/// State of a single round.
///
/// Created by [`Round::start`], mutated only through [`Round::attempt_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub(crate) config: MatchConfig,
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) status: RoundStatus,
    pub(crate) move_count: usize,
    pub(crate) switch: Option<SwitchState>,
    pub(crate) history: Vec<MoveRecord>,
}

impl Round {
    /// Validates the configuration and starts a fresh round with X to move.
    #[instrument]
    pub fn start(config: &MatchConfig) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        Ok(Self::fresh(config))
    }

    /// Fresh round from an already validated configuration.
    pub(crate) fn fresh(config: MatchConfig) -> Self {
        debug!(variant = %config.variant, size = config.size, "Starting round");
        Self {
            board: Board::new(config.size),
            current_player: Player::X,
            status: RoundStatus::Active,
            move_count: 0,
            switch: config.variant.is_switch().then(SwitchState::default),
            history: Vec::new(),
            config,
        }
    }

    /// Rebuilds a round by applying move attempts in order.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(config: &MatchConfig, moves: &[Move]) -> Result<Self, EngineError> {
        let mut round = Self::start(config)?;
        for action in moves {
            round.attempt_move(action.index, action.player)?;
        }
        Ok(round)
    }

    /// Returns the normalized configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the round status.
    pub fn status(&self) -> &RoundStatus {
        &self.status
    }

    /// False once the round is won or drawn.
    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    /// Completed moves this round, relocations included.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Completed moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Switch bookkeeping, present only in the switch variant.
    pub fn switch_state(&self) -> Option<&SwitchState> {
        self.switch.as_ref()
    }

    /// The player's switch queue; empty outside the switch variant.
    pub fn queue(&self, player: Player) -> &[usize] {
        self.switch.as_ref().map_or(&[], |s| s.queues.get(player))
    }

    /// The piece picked up for relocation, if any.
    pub fn pending_relocation(&self) -> Option<usize> {
        self.switch.as_ref().and_then(|s| s.pending_relocation)
    }

    /// The winner, once the round is won.
    pub fn winner(&self) -> Option<Player> {
        match &self.status {
            RoundStatus::Won { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// The winning line, once the round is won.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        match &self.status {
            RoundStatus::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Attempts a move for `player` at `index`.
    ///
    /// On error the round is left untouched.
    #[instrument(skip(self), fields(variant = %self.config.variant))]
    pub fn attempt_move(&mut self, index: usize, player: Player) -> Result<MoveOutcome, MoveError> {
        let action = Move::new(player, index);
        MoveContract::pre(self, &action).inspect_err(|err| debug!(%err, "Move rejected"))?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let result = if self.config.variant.is_switch() {
            self.apply_switch(action)
        } else {
            self.apply_placement(action)
        };

        match &result {
            Ok(outcome) => {
                debug!(?outcome, "Move applied");
                #[cfg(debug_assertions)]
                assert_postconditions(&before, self);
            }
            Err(err) => debug!(%err, "Move rejected"),
        }
        result
    }

    /// Classic, rapid and guess: fill an empty cell.
    fn apply_placement(&mut self, action: Move) -> Result<MoveOutcome, MoveError> {
        if !self.board.is_empty(action.index) {
            return Err(IllegalMove::SquareOccupied(action.index).into());
        }
        self.board.put(action.index, Square::Occupied(action.player));
        Ok(self.complete(MoveRecord::new(action.player, action.index, None)))
    }

    /// Switch: select a piece, place a new one, or drop the selected one.
    fn apply_switch(&mut self, action: Move) -> Result<MoveOutcome, MoveError> {
        let Move { player, index } = action;
        let switch = self.switch.get_or_insert_with(SwitchState::default);

        match self.board.get(index) {
            Some(Square::Occupied(owner)) if owner == player => {
                if switch.pending_relocation.is_some() {
                    return Err(IllegalMove::RelocationPending(index).into());
                }
                if switch.queues.get(player).len() < SWITCH_PIECE_LIMIT {
                    return Err(IllegalMove::QueueNotFull(index).into());
                }
                switch.pending_relocation = Some(index);
                Ok(MoveOutcome::Selected(index))
            }
            Some(Square::Occupied(_)) => Err(IllegalMove::NotYourPiece(index).into()),
            _ => {
                let queue_len = switch.queues.get(player).len();
                let from = match switch.pending_relocation.take() {
                    Some(from) => {
                        self.board.put(from, Square::Empty);
                        switch.queues.get_mut(player).retain(|&cell| cell != from);
                        Some(from)
                    }
                    None if queue_len < SWITCH_PIECE_LIMIT => None,
                    None => return Err(IllegalMove::MustRelocate(player).into()),
                };
                self.board.put(index, Square::Occupied(player));
                switch.queues.get_mut(player).push(index);
                Ok(self.complete(MoveRecord::new(player, index, from)))
            }
        }
    }

    /// Records a completed move and settles the round's status.
    fn complete(&mut self, record: MoveRecord) -> MoveOutcome {
        self.move_count += 1;
        self.history.push(record);

        let outcome = if let Some(line) =
            check_win_condition(&self.board, self.config.win_length, record.to)
        {
            info!(player = %record.player, pattern = %line.pattern_name(), "Round won");
            self.status = RoundStatus::Won {
                player: record.player,
                line: line.clone(),
            };
            MoveOutcome::Won {
                player: record.player,
                line,
            }
        } else if is_draw(&self.board, self.config.variant) {
            info!(moves = self.move_count, "Round drawn");
            self.status = RoundStatus::Draw;
            MoveOutcome::Draw
        } else {
            self.current_player = self.current_player.opponent();
            if let Some(switch) = self.switch.as_mut() {
                switch.pending_relocation = None;
            }
            MoveOutcome::Continued
        };

        outcome
    }
}
