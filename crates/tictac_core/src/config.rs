//! Match configuration: grid geometry, variant, and opponent settings.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Smallest supported board side.
pub const MIN_SIZE: usize = 3;
/// Largest supported board side.
pub const MAX_SIZE: usize = 32;
/// Shortest supported winning line.
pub const MIN_WIN_LENGTH: usize = 3;
/// Board side forced by the rapid variant.
pub const RAPID_SIZE: usize = 10;
/// Win length forced by the rapid variant.
pub const RAPID_WIN_LENGTH: usize = 5;

/// Named rule-set altering board size, win length or move legality.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Variant {
    /// Standard rules.
    #[default]
    Classic,
    /// Each player keeps at most three live pieces and relocates beyond that.
    Switch,
    /// 10x10 board, five in a row.
    Rapid,
    /// Classic rules under a different name.
    Guess,
}

impl Variant {
    /// True for the piece-recycling variant.
    pub fn is_switch(self) -> bool {
        matches!(self, Variant::Switch)
    }

    /// Switch boards never fill up, so only the other variants can draw.
    pub fn allows_draw(self) -> bool {
        !self.is_switch()
    }
}

/// Who plays O.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Opponent {
    /// A second human at the same device.
    #[default]
    Human,
    /// The built-in heuristic.
    Ai,
}

/// AI strength. Only meaningful when the opponent is [`Opponent::Ai`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniform random placement.
    Easy,
    /// Random 60% of the time, otherwise hard.
    #[default]
    Medium,
    /// One-ply win, then block, then random.
    Hard,
}

/// Configuration of a match, fixed once a round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board side length.
    pub size: usize,
    /// Consecutive marks needed to win.
    pub win_length: usize,
    /// Rule-set in play.
    pub variant: Variant,
    /// Who plays O.
    pub opponent: Opponent,
    /// AI strength.
    pub difficulty: Difficulty,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            size: MIN_SIZE,
            win_length: MIN_WIN_LENGTH,
            variant: Variant::Classic,
            opponent: Opponent::Human,
            difficulty: Difficulty::Medium,
        }
    }
}

impl MatchConfig {
    /// Default configuration for the given variant.
    #[instrument]
    pub fn for_variant(variant: Variant) -> Self {
        let config = Self {
            variant,
            ..Self::default()
        };
        config.normalized()
    }

    /// Applies variant overrides without validating.
    ///
    /// Rapid always plays five in a row on a 10x10 board.
    pub fn normalized(mut self) -> Self {
        if self.variant == Variant::Rapid {
            self.size = RAPID_SIZE;
            self.win_length = RAPID_WIN_LENGTH;
        }
        self
    }

    /// Normalizes and validates the configuration.
    #[instrument]
    pub fn validate(&self) -> Result<Self, ConfigError> {
        let config = self.normalized();
        if config.size < MIN_SIZE {
            return Err(ConfigError::new(ConfigErrorKind::BoardTooSmall(config.size)));
        }
        if config.size > MAX_SIZE {
            return Err(ConfigError::new(ConfigErrorKind::BoardTooLarge(config.size)));
        }
        if config.win_length < MIN_WIN_LENGTH || config.win_length > config.size {
            return Err(ConfigError::new(ConfigErrorKind::WinLengthOutOfRange {
                win_length: config.win_length,
                size: config.size,
            }));
        }
        debug!(?config, "Configuration validated");
        Ok(config)
    }

    /// Parses a configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(ConfigErrorKind::Read(e.to_string())))?;

        let config = Self::from_toml_str(&content)?;
        info!(variant = %config.variant, size = config.size, "Config loaded successfully");
        Ok(config)
    }
}

/// What went wrong with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// Board side below the minimum.
    #[display("board size {} is below the minimum of 3", _0)]
    BoardTooSmall(usize),
    /// Board side above the maximum.
    #[display("board size {} is above the maximum of 32", _0)]
    BoardTooLarge(usize),
    /// Win length shorter than 3 or longer than the board side.
    #[display("win length {} must be between 3 and the board size {}", win_length, size)]
    WinLengthOutOfRange {
        /// Requested win length.
        win_length: usize,
        /// Board side it was checked against.
        size: usize,
    },
    /// Config file could not be read.
    #[display("failed to read config file: {}", _0)]
    Read(String),
    /// Config text was not valid TOML for a match.
    #[display("failed to parse config: {}", _0)]
    Parse(String),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub kind: ConfigErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Round;
    use std::str::FromStr;

    #[test]
    fn test_default_is_classic_three() {
        let config = MatchConfig::default().validate().unwrap();
        assert_eq!(config.size, 3);
        assert_eq!(config.win_length, 3);
        assert_eq!(config.variant, Variant::Classic);
    }

    #[test]
    fn test_rapid_overrides_geometry() {
        let config = MatchConfig {
            size: 4,
            win_length: 4,
            variant: Variant::Rapid,
            ..MatchConfig::default()
        };
        let config = config.validate().unwrap();
        assert_eq!(config.size, RAPID_SIZE);
        assert_eq!(config.win_length, RAPID_WIN_LENGTH);
    }

    #[test]
    fn test_rejects_small_board() {
        let config = MatchConfig {
            size: 2,
            win_length: 2,
            ..MatchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::BoardTooSmall(2));
    }

    #[test]
    fn test_rejects_huge_board() {
        let config = MatchConfig {
            size: 1 << 33,
            ..MatchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::BoardTooLarge(1 << 33));
        assert!(Round::start(&config).is_err());

        let largest = MatchConfig {
            size: MAX_SIZE,
            ..MatchConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_rejects_win_length_longer_than_board() {
        let config = MatchConfig {
            size: 4,
            win_length: 5,
            ..MatchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.kind,
            ConfigErrorKind::WinLengthOutOfRange { win_length: 5, size: 4 }
        ));
        assert!(err.to_string().contains("win length 5"));
    }

    #[test]
    fn test_parse_variant_names() {
        assert_eq!(Variant::from_str("switch").unwrap(), Variant::Switch);
        assert_eq!(Variant::from_str("RAPID").unwrap(), Variant::Rapid);
        assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
        assert_eq!(Opponent::from_str("ai").unwrap(), Opponent::Ai);
        assert!(Variant::from_str("chess").is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = MatchConfig::from_toml_str(
            r#"
            variant = "switch"
            opponent = "ai"
            difficulty = "hard"
            "#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::Switch);
        assert_eq!(config.opponent, Opponent::Ai);
        assert_eq!(config.size, 3);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = MatchConfig::from_toml_str("size = \"big\"").unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.toml");
        std::fs::write(&path, "size = 5\nwin_length = 4\n").unwrap();
        let config = MatchConfig::from_file(&path).unwrap();
        assert_eq!(config.size, 5);
        assert_eq!(config.win_length, 4);
    }

    #[test]
    fn test_from_missing_file() {
        let err = MatchConfig::from_file("/nonexistent/match.toml").unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::Read(_)));
    }
}
