//! Configuration management for the G-code interpreter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Dialect directory configuration

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the G-code interpreter
#[derive(Debug, Parser)]
#[command(name = "ghermeneus")]
#[command(about = "Interpret G-code into machine state space vectors")]
#[command(version)]
pub struct Args {
    /// G-code file to interpret, `-` for stdin
    pub input: PathBuf,

    /// Explicitly specify the G-code dialect to use
    #[arg(long, help = "G-code dialect to use (e.g., 'marlin')")]
    pub dialect: Option<String>,

    /// Custom dialect directory to search for dialect files
    #[arg(long, help = "Directory containing dialect TOML files")]
    pub dialect_dir: Option<PathBuf>,

    /// Disable parallel line extraction
    #[arg(long)]
    pub sequential: bool,

    /// Output rendering
    #[arg(long, value_enum, default_value_t = OutputFormat::States)]
    pub format: OutputFormat,

    /// Log level for the interpreter
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// How parse results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per instruction with its parameters
    Instructions,
    /// One line per state vector, prefixed by its instruction
    States,
    /// Comma separated state vectors with an axis header
    Csv,
    /// JSON array of instructions with their state
    Json,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    /// Dialect name explicitly set via command line
    pub cli_dialect: Option<String>,
    /// Dialect directories to search, lowest priority first
    pub dialect_dirs: Vec<PathBuf>,
    pub parallel: bool,
    pub format: OutputFormat,
    /// Log filter, `RUST_LOG` is used when unset
    pub log_level: Option<String>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut dialect_dirs = Vec::new();

        // User global directory: ~/.config/ghermeneus/dialects/
        if let Some(config_dir) = dirs::config_dir() {
            dialect_dirs.push(config_dir.join("ghermeneus").join("dialects"));
        }

        // Current workspace directory: ./.ghermeneus/dialects/
        dialect_dirs.push(std::env::current_dir()?.join(".ghermeneus").join("dialects"));

        // User-specified directory wins over both
        if let Some(custom_dir) = args.dialect_dir {
            dialect_dirs.push(custom_dir);
        }

        Ok(Config {
            input: args.input,
            cli_dialect: args.dialect,
            dialect_dirs,
            parallel: !args.sequential,
            format: args.format,
            log_level: args.log_level,
        })
    }

    /// True when the input is `-`
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    /// Get the effective dialect name from CLI arguments
    pub fn get_effective_dialect(&self) -> Option<String> {
        self.cli_dialect.clone()
    }
}
