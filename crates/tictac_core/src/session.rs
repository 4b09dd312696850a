//! Match management: rounds, running totals and player preferences.

use super::action::{IllegalMove, MoveError, MoveOutcome};
use super::ai::{compute_ai_move, AiMove, RandomSource};
use super::config::{ConfigError, MatchConfig, Opponent};
use super::round::Round;
use super::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Default display name for X.
pub const DEFAULT_X_NAME: &str = "Player 1";
/// Default display name for O.
pub const DEFAULT_O_NAME: &str = "Player 2";

/// Wins per player across the rounds of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Rounds won by X.
    pub x: u32,
    /// Rounds won by O.
    pub o: u32,
}

impl Scores {
    /// Score of the given player.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn record_win(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// Aggregate play statistics for a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Rounds that ended in a win or draw.
    pub games_played: u32,
    /// Completed moves across all rounds.
    pub total_moves: u32,
}

/// Display names for both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNames")]
pub struct PlayerNames {
    x: String,
    o: String,
}

/// Names as stored; normalized through [`PlayerNames::new`] on load.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawNames {
    x: String,
    o: String,
}

impl From<RawNames> for PlayerNames {
    fn from(raw: RawNames) -> Self {
        Self::new(&raw.x, &raw.o)
    }
}

impl PlayerNames {
    /// Trims both names; blank names fall back to the defaults.
    #[instrument]
    pub fn new(x: &str, o: &str) -> Self {
        fn or_default(name: &str, default: &str) -> String {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Self {
            x: or_default(x, DEFAULT_X_NAME),
            o: or_default(o, DEFAULT_O_NAME),
        }
    }

    /// Name shown for the given player.
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new(DEFAULT_X_NAME, DEFAULT_O_NAME)
    }
}

/// Colour scheme preference.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Dark background.
    #[default]
    Dark,
    /// Light background.
    Light,
}

impl Theme {
    /// Switches between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// User preferences the host persists alongside match totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Whether the host plays sound effects.
    pub sound_enabled: bool,
    /// Colour scheme.
    pub theme: Theme,
    /// Player display names.
    pub player_names: PlayerNames,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            theme: Theme::Dark,
            player_names: PlayerNames::default(),
        }
    }
}

impl Preferences {
    /// Flips the sound preference and returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }
}

/// Flat cross-session record of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct MatchSnapshot {
    scores: Scores,
    round: u32,
    stats: MatchStats,
    preferences: Preferences,
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self {
            scores: Scores::default(),
            round: 1,
            stats: MatchStats::default(),
            preferences: Preferences::default(),
        }
    }
}

impl MatchSnapshot {
    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses from JSON; missing fields take defaults.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// A sequence of rounds sharing one configuration and running totals.
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    round: Round,
    round_number: u32,
    scores: Scores,
    stats: MatchStats,
    preferences: Preferences,
}

impl Match {
    /// Validates the configuration and starts round 1.
    #[instrument(skip(preferences))]
    pub fn new(config: MatchConfig, preferences: Preferences) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        info!(variant = %config.variant, opponent = %config.opponent, "Starting match");
        Ok(Self {
            round: Round::fresh(config),
            config,
            round_number: 1,
            scores: Scores::default(),
            stats: MatchStats::default(),
            preferences,
        })
    }

    /// Resumes totals and preferences from a snapshot with a fresh round.
    #[instrument(skip(snapshot))]
    pub fn restore(config: MatchConfig, snapshot: MatchSnapshot) -> Result<Self, ConfigError> {
        let mut game = Self::new(config, snapshot.preferences)?;
        game.scores = snapshot.scores;
        game.stats = snapshot.stats;
        game.round_number = snapshot.round.max(1);
        debug!(round = game.round_number, "Match restored");
        Ok(game)
    }

    /// Captures the cross-session record.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            scores: self.scores,
            round: self.round_number,
            stats: self.stats,
            preferences: self.preferences.clone(),
        }
    }

    /// Returns the normalized configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the round in play.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// 1-based round counter.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Returns the scores.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Returns the statistics.
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    /// Returns the preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Returns the preferences for editing.
    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    /// Applies a move to the current round and updates totals.
    #[instrument(skip(self), fields(round = self.round_number))]
    pub fn attempt_move(&mut self, index: usize, player: Player) -> Result<MoveOutcome, MoveError> {
        let outcome = self.round.attempt_move(index, player)?;
        if !matches!(outcome, MoveOutcome::Selected(_)) {
            self.stats.total_moves += 1;
        }
        if outcome.is_terminal() {
            self.stats.games_played += 1;
        }
        if let Some(winner) = outcome.winner() {
            self.scores.record_win(winner);
            info!(
                winner = %winner,
                name = self.preferences.player_names.name(winner),
                x = self.scores.x,
                o = self.scores.o,
                "Score updated"
            );
        }
        Ok(outcome)
    }

    /// True when the AI should act: it always plays O.
    pub fn is_ai_turn(&self) -> bool {
        self.config.opponent == Opponent::Ai
            && self.round.is_active()
            && self.round.current_player() == Player::O
    }

    /// Asks the AI for a move in the current round.
    pub fn compute_ai_move(&self, rng: &mut impl RandomSource) -> Option<AiMove> {
        compute_ai_move(&self.round, self.config.difficulty, rng)
    }

    /// Lets the AI play the current player's turn.
    ///
    /// Relocations are applied as a selection followed by a placement.
    #[instrument(skip(self, rng), fields(round = self.round_number))]
    pub fn play_ai_turn(&mut self, rng: &mut impl RandomSource) -> Result<MoveOutcome, MoveError> {
        let mark = self.round.current_player();
        let AiMove { relocate_from, to } = self
            .compute_ai_move(rng)
            .ok_or(MoveError::IllegalMove(IllegalMove::RoundOver))?;
        if let Some(from) = relocate_from
            && self.round.pending_relocation() != Some(from)
        {
            self.attempt_move(from, mark)?;
        }
        self.attempt_move(to, mark)
    }

    /// Starts the next round, keeping totals.
    #[instrument(skip(self))]
    pub fn next_round(&mut self) {
        self.round_number += 1;
        self.round = Round::fresh(self.config);
        debug!(round = self.round_number, "Next round");
    }

    /// Clears the board of the current round without advancing the counter.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) {
        self.round = Round::fresh(self.config);
    }

    /// Zeroes scores and statistics and starts again from round 1.
    ///
    /// Preferences survive.
    #[instrument(skip(self))]
    pub fn start_new_match(&mut self) {
        self.scores = Scores::default();
        self.stats = MatchStats::default();
        self.round_number = 1;
        self.round = Round::fresh(self.config);
        info!("New match started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_names_default_and_trim() {
        let names = PlayerNames::new("  Ada ", "   ");
        assert_eq!(names.name(Player::X), "Ada");
        assert_eq!(names.name(Player::O), DEFAULT_O_NAME);
    }

    #[test]
    fn test_loaded_names_are_normalized() {
        let json = r#"{"preferences":{"player_names":{"x":"   ","o":" Bo "}}}"#;
        let snapshot = MatchSnapshot::from_json(json).unwrap();
        let names = &snapshot.preferences().player_names;
        assert_eq!(names.name(Player::X), DEFAULT_X_NAME);
        assert_eq!(names.name(Player::O), "Bo");

        let missing = MatchSnapshot::from_json(r#"{"preferences":{"player_names":{}}}"#).unwrap();
        assert_eq!(missing.preferences().player_names, PlayerNames::default());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
    }

    #[test]
    fn test_preferences_toggle_sound() {
        let mut prefs = Preferences::default();
        assert!(prefs.sound_enabled);
        assert!(!prefs.toggle_sound());
        assert!(prefs.toggle_sound());
    }

    #[test]
    fn test_snapshot_defaults_missing_fields() {
        let snapshot = MatchSnapshot::from_json(r#"{"scores":{"x":2,"o":1}}"#).unwrap();
        assert_eq!(snapshot.scores().x, 2);
        assert_eq!(*snapshot.round(), 1);
        assert!(snapshot.preferences().sound_enabled);
    }
}
