//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Depsentry -- extract Package URL coordinates from dependency manifests.
///
/// Use `depsentry <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "depsentry", version, about, long_about = None)]
pub struct Cli {
    /// Path to the depsentry.toml configuration file.
    #[arg(short, long, default_value = "depsentry.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract coordinates from one or more manifest files.
    Extract(ExtractArgs),

    /// Find and extract every recognised manifest in a directory.
    Scan(ScanArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- extract ----

/// Extract coordinates from manifest files.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Manifest files (package-lock.json, requirements.txt, yarn.lock).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

// ---- scan ----

/// Scan a directory (non-recursive) for manifests.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

// ---- config ----

/// Manage depsentry configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, extractor).
        #[arg(long)]
        section: Option<String>,
    },
}
