//! Interactive play loop: renders the match and routes turns to controllers.

use crate::players::{Controller, MenuCommand, Turn};
use anyhow::Result;
use std::io::Write;
use std::time::{Duration, Instant};
use tictac_core::{Match, MatchSnapshot, MoveOutcome, Player, Theme};
use tracing::{debug, info, instrument};

const RESET: &str = "\x1b[0m";
const BELL: &str = "\x07";

fn mark_colour(theme: Theme, player: Player) -> &'static str {
    match (theme, player) {
        (Theme::Dark, Player::X) => "\x1b[96m",
        (Theme::Dark, Player::O) => "\x1b[95m",
        (Theme::Light, Player::X) => "\x1b[34m",
        (Theme::Light, Player::O) => "\x1b[31m",
    }
}

/// Board text with marks coloured for the theme.
fn paint_board(game: &Match) -> String {
    let theme = game.preferences().theme;
    game.round()
        .board()
        .display()
        .chars()
        .map(|c| match c {
            'X' => format!("{}X{}", mark_colour(theme, Player::X), RESET),
            'O' => format!("{}O{}", mark_colour(theme, Player::O), RESET),
            other => other.to_string(),
        })
        .collect()
}

fn render(game: &Match, out: &mut dyn Write) -> Result<()> {
    let names = &game.preferences().player_names;
    writeln!(out)?;
    writeln!(
        out,
        "Round {} | {} {} - {} {} | {}",
        game.round_number(),
        names.name(Player::X),
        game.scores().x,
        game.scores().o,
        names.name(Player::O),
        game.config().variant,
    )?;
    writeln!(out, "{}", paint_board(game))?;
    Ok(())
}

/// Formats a duration as `M:SS`.
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn announce(
    game: &Match,
    outcome: &MoveOutcome,
    elapsed: Duration,
    out: &mut dyn Write,
) -> Result<()> {
    let bell = if game.preferences().sound_enabled { BELL } else { "" };
    match outcome {
        MoveOutcome::Won { player, line } => {
            let name = game.preferences().player_names.name(*player);
            writeln!(out, "{}{} wins with the {}!", bell, name, line.pattern_name())?;
        }
        MoveOutcome::Draw => writeln!(out, "{}It's a draw.", bell)?,
        MoveOutcome::Selected(cell) => {
            writeln!(out, "Picked up {}; choose where it goes.", cell + 1)?;
        }
        MoveOutcome::Continued => {}
    }
    if outcome.is_terminal() {
        writeln!(
            out,
            "Moves: {} | Time: {}",
            game.round().move_count(),
            format_elapsed(elapsed)
        )?;
    }
    Ok(())
}

/// Runs a match until a controller quits.
///
/// The AI acts whenever [`Match::is_ai_turn`] says so; every other action,
/// including commands between rounds, comes from `human`. `save` is called
/// after each finished round, preference change and on exit.
#[instrument(skip_all, fields(human = human.label(), ai = ai.label()))]
pub fn run_match(
    game: &mut Match,
    human: &mut dyn Controller,
    ai: &mut dyn Controller,
    out: &mut dyn Write,
    mut save: impl FnMut(&MatchSnapshot),
) -> Result<()> {
    info!(variant = %game.config().variant, "Match loop started");
    render(game, out)?;
    let mut round_started = Instant::now();

    loop {
        let turn = if game.is_ai_turn() {
            ai.take_turn(game, out)?
        } else {
            human.take_turn(game, out)?
        };

        match turn {
            Turn::Moved(outcome) => {
                announce(game, &outcome, round_started.elapsed(), out)?;
                if outcome.is_terminal() {
                    save(&game.snapshot());
                }
                if !matches!(outcome, MoveOutcome::Selected(_)) {
                    render(game, out)?;
                }
            }
            Turn::Rejected(e) => writeln!(out, "{}", e)?,
            Turn::Command(command) => {
                debug!(?command, "Menu command");
                match command {
                    MenuCommand::NextRound => {
                        game.next_round();
                        round_started = Instant::now();
                        render(game, out)?;
                    }
                    MenuCommand::NewMatch => {
                        game.start_new_match();
                        round_started = Instant::now();
                        save(&game.snapshot());
                        render(game, out)?;
                    }
                    MenuCommand::ToggleSound => {
                        let on = game.preferences_mut().toggle_sound();
                        writeln!(out, "Sound {}", if on { "on" } else { "off" })?;
                        save(&game.snapshot());
                    }
                    MenuCommand::ToggleTheme => {
                        let prefs = game.preferences_mut();
                        prefs.theme = prefs.theme.toggle();
                        writeln!(out, "Theme {}", prefs.theme)?;
                        save(&game.snapshot());
                        render(game, out)?;
                    }
                    MenuCommand::Quit => {
                        save(&game.snapshot());
                        info!(x = game.scores().x, o = game.scores().o, "Match loop ended");
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{AiController, HumanController};
    use std::io::Cursor;
    use tictac_core::{MatchConfig, Opponent, Preferences, SequenceSource};

    fn run(config: MatchConfig, script: &str) -> (Match, String, Vec<MatchSnapshot>) {
        let mut game = Match::new(config, Preferences::default()).unwrap();
        let mut human = HumanController::new(Cursor::new(script.to_string()));
        let mut ai = AiController::new(SequenceSource::new([0.0]));
        let mut out = Vec::new();
        let mut saves = Vec::new();
        run_match(&mut game, &mut human, &mut ai, &mut out, |s| saves.push(s.clone())).unwrap();
        (game, String::from_utf8(out).unwrap(), saves)
    }

    #[test]
    fn test_two_humans_play_a_round() {
        let (game, out, saves) = run(MatchConfig::default(), "1\n4\n2\n5\n3\nq\n");
        assert_eq!(game.scores().x, 1);
        assert!(out.contains("Player 1 wins with the Top Row!"));
        // One save for the win, one on quit.
        assert_eq!(saves.len(), 2);
        assert_eq!(*saves[0].round(), 1);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0:00");
        assert_eq!(format_elapsed(Duration::from_millis(9_900)), "0:09");
        assert_eq!(format_elapsed(Duration::from_secs(75)), "1:15");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn test_round_summary_on_win_and_draw() {
        let (_, out, _) = run(MatchConfig::default(), "1\n4\n2\n5\n3\nq\n");
        assert!(out.contains("Moves: 5 | Time: 0:"));

        let draw = "1\n2\n3\n5\n4\n6\n8\n7\n9\nq\n";
        let (_, out, _) = run(MatchConfig::default(), draw);
        assert!(out.contains("It's a draw."));
        assert!(out.contains("Moves: 9 | Time: 0:"));
    }

    #[test]
    fn test_no_summary_mid_round() {
        let (_, out, _) = run(MatchConfig::default(), "5\nq\n");
        assert!(!out.contains("Moves:"));
    }

    #[test]
    fn test_next_round_between_games() {
        let (game, out, _) = run(MatchConfig::default(), "1\n4\n2\n5\n3\nn\n9\nq\n");
        assert_eq!(game.round_number(), 2);
        assert_eq!(game.round().move_count(), 1);
        assert!(out.contains("Round 2"));
    }

    #[test]
    fn test_ai_answers_each_move() {
        let config = MatchConfig {
            opponent: Opponent::Ai,
            ..MatchConfig::default()
        };
        let (game, out, _) = run(config, "5\nq\n");
        assert_eq!(game.round().move_count(), 2);
        assert_eq!(game.round().current_player(), Player::X);
        assert!(out.contains("Player 2 plays 1"));
    }

    #[test]
    fn test_rejections_are_printed() {
        let (game, out, _) = run(MatchConfig::default(), "5\n5\nq\n");
        assert_eq!(game.round().move_count(), 1);
        assert!(out.contains("Square 4 is already occupied"));
    }

    #[test]
    fn test_sound_toggle_silences_bell() {
        let (game, out, _) = run(MatchConfig::default(), "s\n1\n4\n2\n5\n3\nq\n");
        assert!(!game.preferences().sound_enabled);
        assert!(!out.contains(BELL));
    }
}
