//! # Tangle CLI Module
//!
//! This module implements the CLI interface for Tangle.
//!
//! ## Available Commands
//!
//! - `validate`  - Check a TRAPI message (or bare query graph) for
//!   structural defects
//! - `normalize` - Migrate a legacy graph/message to the canonical shape
//! - `template`  - Emit the default two-node editor state
//! - `apply`     - Replay a command script against a saved editor state

pub mod commands;

use crate::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tangle_core::TangleError;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Tangle - query-graph workbench
///
/// File workflows around the pure query-graph state machine: normalization
/// of historical wire schemas, structural validation, and scripted edits.
#[derive(Parser, Debug)]
#[command(name = "tangle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to an optional TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a TRAPI message for structural defects
    Validate {
        /// Path to the message JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Treat the file as a bare query graph instead of a message
        #[arg(long)]
        graph: bool,
    },

    /// Migrate a legacy graph or message to the canonical shape
    Normalize {
        /// Path to the input JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat the file as a whole message envelope
        #[arg(long)]
        message: bool,
    },

    /// Emit the default two-node editor state
    Template {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay a command script against a saved editor state
    Apply {
        /// Path to the saved editor state JSON
        #[arg(short, long)]
        state: PathBuf,

        /// Path to a JSON array of commands
        #[arg(long)]
        script: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments. Returns the process exit code.
pub fn execute(cli: Cli) -> Result<u8, TangleError> {
    let config = config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Validate { file, graph }) => {
            commands::cmd_validate(&file, graph, json_mode)
        }
        Some(Commands::Normalize {
            file,
            output,
            message,
        }) => commands::cmd_normalize(&file, output.as_deref(), message, &config).map(|()| 0),
        Some(Commands::Apply {
            state,
            script,
            output,
        }) => commands::cmd_apply(&state, &script, output.as_deref(), &config).map(|()| 0),
        Some(Commands::Template { output }) => {
            commands::cmd_template(output.as_deref(), &config).map(|()| 0)
        }
        // No subcommand - emit the template by default
        None => commands::cmd_template(None, &config).map(|()| 0),
    }
}
