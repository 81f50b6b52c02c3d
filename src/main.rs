//! Survival CLI - play the cargo ship survival game or run autopilot voyages.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Survival - keep a cargo ship and its crew alive through 25 disasters
#[derive(Parser, Debug)]
#[command(name = "survival")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal (default)
    Play {
        /// Frames per second (default: 30)
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Write logs to this file (logging is off otherwise)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Sail one voyage on autopilot and print the log
    Run {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the day-by-day log
        #[arg(short, long)]
        quiet: bool,

        /// Use an item when its resource drops below this level (default: 40)
        #[arg(short, long, default_value = "40")]
        threshold: u8,
    },

    /// Sail many autopilot voyages in parallel and aggregate statistics
    Batch {
        /// Number of voyages to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Use an item when its resource drops below this level (default: 40)
        #[arg(short, long, default_value = "40")]
        threshold: u8,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Play {
        fps: 30,
        log_file: None,
    });

    let result = match command {
        Commands::Play { fps, log_file } => cli::init_logging(log_file.as_deref(), true)
            .and_then(|()| cli::play::execute(cli::play::PlayConfig::with_fps(fps))),

        Commands::Run {
            format,
            quiet,
            threshold,
        } => cli::init_logging(None, false)
            .and_then(|()| cli::run::execute(format, quiet, threshold)),

        Commands::Batch {
            games,
            threads,
            threshold,
            format,
            progress,
        } => cli::init_logging(None, false)
            .and_then(|()| cli::batch::execute(games, threads, threshold, format, progress)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
