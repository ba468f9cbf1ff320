//! Command-line surface for the admin harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Assassins mini-game admin console.
#[derive(Debug, Parser)]
#[command(name = "assassins", version, about)]
pub struct Cli {
    /// Seed file with the attendee directory (TOML).
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Answer yes to every confirmation prompt instead of asking.
    #[arg(long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a demo admin session against the in-memory backend.
    Demo,
    /// Print the seeded default elimination methods.
    Methods,
}
