//! Command-line interface for primeherd
//!
//! The default invocation takes the input list file and runs the pipeline;
//! `generate` writes a random list, and the hidden `worker` subcommand is
//! the entry point the cluster engine spawns for its non-root ranks.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

/// primeherd - parallel primality evaluation over integer lists
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub run: commands::run::RunArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a random input list
    Generate(commands::generate::GenerateArgs),
    /// Cluster worker entry point, spawned by the root rank
    #[command(hide = true)]
    Worker(commands::worker::WorkerArgs),
}

impl Cli {
    /// Execute the selected command
    pub fn run(self) -> Result<()> {
        // Initialize output handler with global verbose and quiet settings
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Generate(args)) => commands::generate::execute(args, &output),
            Some(Commands::Worker(args)) => commands::worker::execute(args),
            None => commands::run::execute(self.run, self.config.as_deref(), &output),
        }
    }
}
