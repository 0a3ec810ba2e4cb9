//! Command-line interface for strictly_territory.

use crate::games::territory::ScoringMode;
use clap::{Parser, Subcommand};

/// Strictly Territory - claim cells, grow the largest connected region
#[derive(Parser, Debug)]
#[command(name = "strictly_territory")]
#[command(about = "Territory-claiming grid game for humans and LLM agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game using the seats from a config file
    Play {
        /// Path to the game config (defaults apply if it does not exist)
        #[arg(short, long, default_value = "territory.toml")]
        config: std::path::PathBuf,

        /// Override grid rows
        #[arg(long)]
        rows: Option<usize>,

        /// Override grid columns
        #[arg(long)]
        cols: Option<usize>,

        /// Override retries granted to automated players
        #[arg(long)]
        max_retries: Option<usize>,

        /// Override scoring: largest_component or total_area
        #[arg(long)]
        scoring: Option<ScoringMode>,
    },

    /// Watch two first-open-cell AIs play (no network, no input)
    Demo {
        /// Grid rows
        #[arg(long, default_value = "5")]
        rows: usize,

        /// Grid columns
        #[arg(long, default_value = "5")]
        cols: usize,
    },
}
