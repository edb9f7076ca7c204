//! Command-line interface for Solas.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solas - lower and run Solas intent programs
#[derive(Parser)]
#[command(name = "solas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// File to run (when no subcommand is specified)
    pub file: Option<PathBuf>,

    /// Use this Solas.toml instead of searching from the source directory
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Add or override a credential (repeatable)
    #[arg(long = "credential", global = true, value_name = "NAME=VALUE")]
    pub credentials: Vec<String>,

    /// Never touch the network; every fetch attempt fails
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log pipeline details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile and run a Solas file
    Run {
        /// Path to the Solas file
        file: PathBuf,
    },

    /// Lex, match and lower a Solas file without running it
    Check {
        /// Path to the Solas file
        file: PathBuf,
    },

    /// Print the token table of a Solas file
    Tokens {
        /// Path to the Solas file
        file: PathBuf,
    },

    /// Print the lowered operations of a Solas file
    Lower {
        /// Path to the Solas file
        file: PathBuf,
    },
}

impl Cli {
    /// Resolve the actual command to run. `None` when there is nothing to do.
    pub fn resolve_command(&self) -> Option<ResolvedCommand> {
        let command = match &self.command {
            Some(Commands::Run { file }) => ResolvedCommand::Run { file: file.clone() },
            Some(Commands::Check { file }) => ResolvedCommand::Check { file: file.clone() },
            Some(Commands::Tokens { file }) => ResolvedCommand::Tokens { file: file.clone() },
            Some(Commands::Lower { file }) => ResolvedCommand::Lower { file: file.clone() },
            // Direct file execution: solas program.solas
            None => ResolvedCommand::Run {
                file: self.file.clone()?,
            },
        };
        Some(command)
    }
}

/// Resolved command after processing CLI arguments
pub enum ResolvedCommand {
    Run { file: PathBuf },
    Check { file: PathBuf },
    Tokens { file: PathBuf },
    Lower { file: PathBuf },
}
