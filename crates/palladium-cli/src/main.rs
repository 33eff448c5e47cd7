//! Palladium CLI - Command-line interface for Palladium entity models
//!
//! This binary compiles scene snapshots into Palladium entity model files,
//! loads model files back into scene snapshots, and checks models for
//! lossless round trips.

use clap::{Parser, Subcommand};
use palladium_model::DEFAULT_TOLERANCE;
use std::process::ExitCode;
use tracing::Level;

// Use modules from the library crate
use palladium_cli::commands;

/// Palladium - Entity model converter
#[derive(Parser)]
#[command(name = "palladium")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a scene snapshot into a Palladium entity model
    Compile {
        /// Path to the scene snapshot JSON file
        #[arg(short, long)]
        scene: String,

        /// Output model path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Load a Palladium entity model into a scene snapshot
    Load {
        /// Path to the model file (.json)
        #[arg(short, long)]
        model: String,

        /// Output snapshot path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the part tree of a Palladium entity model
    Inspect {
        /// Path to the model file (.json)
        #[arg(short, long)]
        model: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check that a model survives load and compile unchanged
    Verify {
        /// Path to the model file (.json)
        #[arg(short, long)]
        model: String,

        /// Maximum per-component difference for vectors
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List registered model formats
    Formats {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compile { scene, output } => commands::compile::run(&scene, output.as_deref()),
        Commands::Load { model, output } => commands::load::run(&model, output.as_deref()),
        Commands::Inspect { model, json } => commands::inspect::run(&model, json),
        Commands::Verify {
            model,
            tolerance,
            json,
        } => commands::verify::run(&model, tolerance, json),
        Commands::Formats { json } => commands::formats::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
