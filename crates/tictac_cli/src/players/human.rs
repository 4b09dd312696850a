//! Human controller reading cell numbers and commands from a line source.

use super::{Controller, MenuCommand, Turn, from_result};
use anyhow::Result;
use std::io::{BufRead, Write};
use tictac_core::Match;
use tracing::{debug, instrument};

/// Reads one line per action. End of input quits.
pub struct HumanController<R> {
    input: R,
}

impl<R: BufRead> HumanController<R> {
    /// Creates a controller reading from `input`.
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

/// What a line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Cell(usize),
    Command(MenuCommand),
    Unknown,
}

#[instrument]
fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "n" | "next" => return Input::Command(MenuCommand::NextRound),
        "m" | "match" => return Input::Command(MenuCommand::NewMatch),
        "s" | "sound" => return Input::Command(MenuCommand::ToggleSound),
        "t" | "theme" => return Input::Command(MenuCommand::ToggleTheme),
        "q" | "quit" => return Input::Command(MenuCommand::Quit),
        _ => {}
    }
    // Cells are numbered from 1 on screen.
    match line.parse::<usize>() {
        Ok(number) if number > 0 => Input::Cell(number - 1),
        _ => Input::Unknown,
    }
}

impl<R: BufRead> Controller for HumanController<R> {
    fn take_turn(&mut self, game: &mut Match, out: &mut dyn Write) -> Result<Turn> {
        loop {
            let mark = game.round().current_player();
            if game.round().is_active() {
                let name = game.preferences().player_names.name(mark);
                write!(out, "{} ({}) > ", name, mark)?;
            } else {
                write!(out, "[n]ext round, new [m]atch, [q]uit > ")?;
            }
            out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                return Ok(Turn::Command(MenuCommand::Quit));
            }

            match parse_input(&line) {
                Input::Cell(index) => return Ok(from_result(game.attempt_move(index, mark))),
                Input::Command(command) => return Ok(Turn::Command(command)),
                Input::Unknown => {
                    writeln!(out, "Enter a cell number, or n, m, s, t, q")?;
                }
            }
        }
    }

    fn label(&self) -> &str {
        "human"
    }
}
