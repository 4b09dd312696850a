//! Tictac - terminal front end
//!
//! Plays tic-tac-toe variants against a human or the built-in AI.

#![warn(missing_docs)]

mod cli;
mod players;
mod settings;
mod simulate;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, MatchArgs};
use players::{AiController, HumanController};
use rand::rngs::StdRng;
use std::path::PathBuf;
use tictac_core::{Match, Player, PlayerNames, Preferences, RngSource};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            settings,
            x_name,
            o_name,
            save_file,
            seed,
        } => run_play(settings, x_name, o_name, save_file, seed),
        Command::Simulate {
            settings,
            rounds,
            seed,
        } => run_simulate(settings, rounds, seed),
    }
}

fn rng_for(seed: Option<u64>) -> RngSource<StdRng> {
    seed.map_or_else(RngSource::from_entropy, RngSource::seeded)
}

/// Run an interactive match
#[instrument(skip(args))]
fn run_play(
    args: MatchArgs,
    x_name: Option<String>,
    o_name: Option<String>,
    save_file: PathBuf,
    seed: Option<u64>,
) -> Result<()> {
    let config = args.resolve()?;
    let mut game = match settings::load_snapshot(&save_file) {
        Some(snapshot) => Match::restore(config, snapshot)?,
        None => Match::new(config, Preferences::default())?,
    };

    if x_name.is_some() || o_name.is_some() {
        let names = &game.preferences().player_names;
        let x = x_name.unwrap_or_else(|| names.name(Player::X).to_string());
        let o = o_name.unwrap_or_else(|| names.name(Player::O).to_string());
        game.preferences_mut().player_names = PlayerNames::new(&x, &o);
    }
    info!(round = game.round_number(), "Match ready");

    let stdin = std::io::stdin();
    let mut human = HumanController::new(stdin.lock());
    let mut ai = AiController::new(rng_for(seed));
    let mut out = std::io::stdout();

    println!("Cells are numbered from 1.");
    println!("Commands: n next round, m new match, s sound, t theme, q quit.");
    terminal::run_match(&mut game, &mut human, &mut ai, &mut out, |snapshot| {
        settings::save_snapshot(&save_file, snapshot)
    })
}

/// Run AI-versus-AI rounds and print the totals
#[instrument(skip(args))]
fn run_simulate(args: MatchArgs, rounds: u32, seed: Option<u64>) -> Result<()> {
    let config = args.resolve()?;
    let mut rng = rng_for(seed);
    let report = simulate::simulate(config, rounds, &mut rng)?;

    println!("{} rounds of {} ({})", rounds, config.variant, config.difficulty);
    println!("  X wins:    {}", report.x_wins);
    println!("  O wins:    {}", report.o_wins);
    println!("  Draws:     {}", report.draws);
    if report.abandoned > 0 {
        println!("  Abandoned: {}", report.abandoned);
    }
    println!("  Moves:     {}", report.total_moves);
    Ok(())
}
