//! minesweeper-stats CLI entry point.
//!
//! Records finished games and prints the per-mode statistics tabs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use minesweeper_stats::application::statistics::format_playing_time;
use minesweeper_stats::domain::{GameMode, GameResult};
use minesweeper_stats::infra::app_config::load_config;
use minesweeper_stats::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "minesweeper-stats")]
#[command(version)]
#[command(about = "Minesweeper play statistics and best-time leaderboards", long_about = None)]
struct Args {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the statistics tabs
    Show {
        /// Only show this mode (easy, medium, hard)
        #[arg(short, long)]
        mode: Option<GameMode>,
    },

    /// Record a finished game
    Record {
        #[arg(short, long)]
        mode: GameMode,
        /// Playing time in seconds
        #[arg(short, long)]
        time: u32,
        /// Number of fields uncovered during the game
        #[arg(short, long, default_value = "0")]
        uncovered: u32,
        /// The game was won
        #[arg(long)]
        won: bool,
        /// Leaderboard date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Print the best time of a mode
    Best {
        #[arg(short, long)]
        mode: GameMode,
    },

    /// Delete recorded statistics
    Reset {
        /// Keep play counters, clear only the leaderboard
        #[arg(long)]
        top_times_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let state = AppState::open_with(load_config(), args.db)?;
    log::debug!("Using statistics database {}", state.db.describe_location());

    match args.command {
        Commands::Show { mode } => {
            let mut screen = state.statistics_screen();
            let modes = match mode {
                Some(mode) => vec![mode],
                None => GameMode::ALL.to_vec(),
            };
            for mode in &modes {
                screen.open_tab(*mode);
            }
            screen.enter().await;
            for tab in screen.open_tabs() {
                println!("{}", tab.render());
            }
        }
        Commands::Record {
            mode,
            time,
            uncovered,
            won,
            date,
        } => {
            let stats = state.recorder().record_game(&GameResult {
                mode,
                won,
                playing_time_seconds: time,
                fields_uncovered: uncovered,
                date,
            })?;
            println!(
                "{}: {} played, {} won",
                mode.title(),
                stats.games_played,
                stats.games_won
            );
        }
        Commands::Best { mode } => match state.recorder().best_time(mode)? {
            Some(best) => println!("{}: {}", mode.title(), format_playing_time(best)),
            None => println!("{}: no data", mode.title()),
        },
        Commands::Reset { top_times_only } => {
            let recorder = state.recorder();
            if top_times_only {
                let removed = recorder.reset_top_times()?;
                println!("Removed {} top times", removed);
            } else {
                recorder.reset_all()?;
                println!("All statistics removed");
            }
        }
    }

    Ok(())
}
