//! # AIF CLI Module
//!
//! This module implements the CLI interface for aif.
//!
//! ## Available Commands
//!
//! - `build` - Build a graph from a manifest and write it out
//! - `check` - Build a graph and run the integrity audit
//! - `hash` - Compute the BLAKE3 digest of a built graph

mod commands;

use crate::config::OutputFormat;
use aif_core::AifError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// aif - build AIF knowledge graphs from extraction output
///
/// Reads a JSON extraction manifest and writes an AIF graph carrying
/// confidences, justifications, mutual exclusions, hypotheses and clusters.
#[derive(Parser, Debug)]
#[command(name = "aif")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress summary output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a graph from a manifest
    Build {
        /// Path to the JSON manifest
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format, overriding the configuration
        #[arg(short = 't', long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Build a graph and audit its structure
    Check {
        /// Path to the JSON manifest
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compute BLAKE3 digest of the built graph
    Hash {
        /// Path to the JSON manifest
        #[arg(short, long)]
        input: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
///
/// Returns a failing exit code when `check` finds violations; errors are
/// reserved for inputs that could not be built at all.
pub fn execute(cli: Cli) -> Result<ExitCode, AifError> {
    let options = Options {
        quiet: cli.quiet,
        json: cli.json,
    };
    let config = crate::config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Build {
            input,
            output,
            format,
        } => cmd_build(
            &config,
            options,
            &input,
            output.as_deref(),
            format.unwrap_or(config.output.format),
        ),
        Commands::Check { input } => cmd_check(&config, options, &input),
        Commands::Hash { input } => cmd_hash(&config, options, &input),
    }
}
