//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mood riff progress CLI
#[derive(Parser, Debug)]
#[command(name = "riffctl")]
#[command(about = "Mood Riff - streaks, XP and daily challenges", long_about = None)]
#[command(version = env!("RIFF_VERSION"))]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Directory holding progress records (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (overrides $RIFF_CONFIG and the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a riff created with MOOD
    Create {
        /// Mood id (chill, hype, calm, wild)
        mood: String,

        /// Keep the riff in the library
        #[arg(long)]
        save: bool,

        /// Riff length in seconds when saved
        #[arg(long, default_value_t = 30)]
        duration: u32,
    },

    /// Record a riff share
    Share,

    /// Show xp, level and streak
    Status {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show today's challenge
    Challenge {
        /// Mark today's challenge complete
        #[arg(long)]
        complete: bool,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Riffs created per mood
    History,

    /// List available moods
    Moods,

    /// Saved riff library
    Riffs {
        #[command(subcommand)]
        action: RiffCommands,
    },
}

/// Library subcommands
#[derive(Subcommand, Debug)]
pub enum RiffCommands {
    /// List saved riffs, newest first
    List,
    /// Delete a saved riff
    Delete { id: u64 },
}
