//! Strictly Rounds - command-line front end
//!
//! Runs a file-backed game store with a plain-text view.

#![warn(missing_docs)]

mod cli;

use std::io::BufRead;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_rounds::{
    FileStorage, GameController, GameStore, Intent, StoreConfig, StoreError, TextView,
};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };

    let storage = FileStorage::open(config.storage_dir())?;
    let store = GameStore::new(storage, config.storage_key(), config.players_by_seat()?);
    let mut controller = GameController::new(store, TextView::new(std::io::stdout()));

    match cli.command {
        Command::Show => {
            controller.render();
            Ok(())
        }
        Command::Move { square } => Ok(controller.handle(Intent::Move { square_id: square })?),
        Command::Reset => Ok(controller.handle(Intent::Reset)?),
        Command::NewRound => Ok(controller.handle(Intent::NewRound)?),
        Command::ClearStats => Ok(controller.clear_stats()?),
        Command::Play => play(&mut controller),
    }
}

/// Reads intents line by line until EOF or `q`.
///
/// An empty line reloads the state, picking up writes from other processes.
#[instrument(skip(controller))]
fn play(controller: &mut GameController<FileStorage, TextView<std::io::Stdout>>) -> Result<()> {
    info!("Interactive session started");
    controller.render();
    eprintln!("Enter a square (1-9), 'r' to reset, 'n' for a new round, 'q' to quit.");
    prompt(controller);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        let applied = match input {
            "q" | "quit" => break,
            "" => controller.reload(),
            _ => match Intent::parse(input) {
                Some(intent) => controller.handle(intent),
                None => {
                    eprintln!("Unrecognized input: {input}");
                    Ok(())
                }
            },
        };
        report(applied);

        match controller.sync() {
            Ok(true) => debug!("Applied external change"),
            Ok(false) => {}
            Err(e) => report(Err(e)),
        }
        prompt(controller);
    }

    info!("Interactive session ended");
    Ok(())
}

/// Store failures end the operation, not the session; the store keeps its
/// last persisted state.
fn report(result: Result<(), StoreError>) {
    if let Err(e) = result {
        warn!(error = %e, "Operation failed");
        eprintln!("Not saved: {e}");
    }
}

/// Lists the squares still open in the current round.
fn prompt(controller: &GameController<FileStorage, TextView<std::io::Stdout>>) {
    let open: Vec<String> = controller
        .store()
        .snapshot()
        .moves()
        .open_positions()
        .iter()
        .map(|pos| pos.square_id().to_string())
        .collect();
    if !open.is_empty() {
        eprintln!("Open squares: {}", open.join(" "));
    }
}
