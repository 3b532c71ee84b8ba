//! Lagash CLI - run the decision engine on snapshots and manage genomes.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// Lagash - mission and action decisions for grid strategy bots
#[derive(Parser, Debug)]
#[command(name = "lagash")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide one turn for a snapshot
    Decide {
        /// Snapshot file (JSON, or a text observation ending in .txt)
        #[arg(long)]
        snapshot: PathBuf,

        /// Genome file
        #[arg(long)]
        genome: PathBuf,

        /// Mission state file, read if present and rewritten afterwards
        #[arg(long)]
        state: Option<PathBuf>,

        /// Policy seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Engine config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Side to play for JSON snapshots (text observations carry their own)
        #[arg(long, default_value = "0")]
        team: u8,

        /// Turn number for text observations
        #[arg(long, default_value = "0")]
        turn: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Create or inspect genome files
    Genome {
        #[command(subcommand)]
        command: GenomeCommands,
    },

    /// Print a generated board as JSON
    Board {
        /// Board seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Board width
        #[arg(long, default_value = "16")]
        width: u16,

        /// Board height
        #[arg(long, default_value = "16")]
        height: u16,
    },
}

/// Genome subcommands
#[derive(Subcommand, Debug)]
enum GenomeCommands {
    /// Write a random genome
    Random {
        /// Turns covered (default: 360)
        #[arg(short, long, default_value = "360")]
        turns: usize,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Show per-mission mean weights
    Inspect {
        /// Genome file
        file: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Decide {
            snapshot,
            genome,
            state,
            seed,
            config,
            team,
            turn,
            format,
        } => cli::decide::execute(&cli::decide::DecideArgs {
            snapshot,
            genome,
            state,
            seed,
            config,
            team,
            turn,
            format,
        }),

        Commands::Genome { command } => match command {
            GenomeCommands::Random { turns, seed, out } => cli::genome::random(turns, seed, &out),
            GenomeCommands::Inspect { file } => cli::genome::inspect(&file),
        },

        Commands::Board {
            seed,
            width,
            height,
        } => cli::board::execute(seed, width, height),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
