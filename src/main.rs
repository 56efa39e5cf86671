//! Terminal entry point: CLI flags, logging, terminal setup and teardown.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use slide_puzzle::app::App;
use slide_puzzle::config::Config;

/// Sliding tile puzzle for the terminal.
#[derive(Parser)]
#[command(name = "slide-puzzle", version, about = "Sliding tile puzzle for the terminal")]
struct Cli {
    /// Board side length N for an NxN grid
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=15))]
    size: u8,

    /// Number of random slides used to scramble a new puzzle
    #[arg(long, default_value_t = 80)]
    shuffle_moves: u16,

    /// Frame duration in milliseconds
    #[arg(long, default_value_t = 33)]
    frame_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config {
        size: cli.size as usize,
        shuffle_moves: cli.shuffle_moves as usize,
        frame: Duration::from_millis(cli.frame_ms.max(1)),
        ..Config::default()
    };

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = App::new(config).run(&mut terminal);
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
