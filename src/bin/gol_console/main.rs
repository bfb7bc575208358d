mod sim;
mod term;

use anyhow::Result;
use clap::Parser;
use gol_console::Settings;

/// Interactive console simulator for Conway's Game of Life.
///
/// Renders the toroidal board every generation together with its statistics
/// (live cells, matched patterns, symmetric pairs). Press S to save the
/// board, L to load one, Escape to quit.
#[derive(Parser, Debug)]
#[command(version, about)]
struct CliArgs {
    /// Path to the JSON settings file; created with defaults if missing
    #[arg(short, long, default_value = "settings.json")]
    settings: String,

    /// Seed for the initial random fill, taken from the OS if omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let settings = Settings::load_or_create(&args.settings)?;
    sim::run(&settings, args.seed)
}
