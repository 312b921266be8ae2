//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default target context, matching the flagship Macbeth transposition.
pub const DEFAULT_CONTEXT: &str = "A 2030 High-Frequency Trading Firm in Manhattan";

/// Tintoretto - transpose classic drama into a new setting under lexical constraints
#[derive(Parser, Debug)]
#[command(name = "tintoretto")]
#[command(about = "Transpose classic drama into a new setting under lexical constraints", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline and write the story artifacts
    Run {
        /// Target context to transpose the source work into
        #[arg(long, default_value = DEFAULT_CONTEXT)]
        context: String,

        /// Scene selector as ACT:SCENE; repeat for multiple scenes
        #[arg(long = "scene")]
        scene: Vec<String>,

        /// Model override for both pipeline stages
        #[arg(long)]
        model: Option<String>,

        /// Reuse a saved world bible instead of building one
        #[arg(long)]
        bible: Option<PathBuf>,

        /// Custom source-work profile TOML (defaults to the built-in Macbeth profile)
        #[arg(long)]
        work: Option<PathBuf>,

        /// Directory for output artifacts
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Build the world bible and save it without generating scenes
    Bible {
        /// Target context to map the source work into
        #[arg(long, default_value = DEFAULT_CONTEXT)]
        context: String,

        /// Model override for the bible request
        #[arg(long)]
        model: Option<String>,

        /// Custom source-work profile TOML (defaults to the built-in Macbeth profile)
        #[arg(long)]
        work: Option<PathBuf>,

        /// Directory for output artifacts
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Validate an existing text file against the banned-term list
    Check {
        /// Path to the text file to validate
        file: PathBuf,

        /// Source-work profile supplying the banned-term list
        #[arg(long)]
        work: Option<PathBuf>,
    },
}
