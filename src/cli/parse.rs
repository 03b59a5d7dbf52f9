//! CLI parse: clap types for dendrite. No behavior; definitions only.

use crate::types::DatabaseKind;
use crate::views::ViewMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dendrite CLI - versioned hierarchical note store
#[derive(Parser, Debug)]
#[command(name = "dendrite")]
#[command(about = "Inspect and render a versioned hierarchical note database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config files are looked up here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Database directory (overrides db_root from config)
    #[arg(long)]
    pub db_root: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an empty database unless one exists
    Init,
    /// Load the database and report counts
    Check,
    /// Print the interface view of one database
    Render {
        /// Database kind (conceptual, concrete, temporal)
        #[arg(long, value_parser = parse_kind)]
        kind: DatabaseKind,
        /// Node to focus before rendering
        #[arg(long)]
        node: Option<String>,
        /// Notes to open before rendering (path ending in a note id)
        #[arg(long = "open")]
        open: Vec<String>,
        /// Output budget in bytes (defaults to render.max_interface_length)
        #[arg(long)]
        max_length: Option<usize>,
        /// View mode (full, working_set, tie)
        #[arg(long, default_value = "full", value_parser = parse_mode)]
        mode: ViewMode,
    },
    /// Resolve a path and print its canonical form
    Resolve {
        path: String,
        /// Expect a trailing note id
        #[arg(long)]
        note: bool,
        /// Database whose root anchors relative paths
        #[arg(long, default_value = "concrete", value_parser = parse_kind)]
        kind: DatabaseKind,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Show the change summary of the loaded database
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn parse_kind(raw: &str) -> Result<DatabaseKind, String> {
    DatabaseKind::from_token(raw)
        .ok_or_else(|| format!("unknown database kind '{}' (expected one of {})", raw, DatabaseKind::known_tokens()))
}

fn parse_mode(raw: &str) -> Result<ViewMode, String> {
    match raw {
        "full" => Ok(ViewMode::Full),
        "working_set" | "working-set" => Ok(ViewMode::WorkingSet),
        "tie" => Ok(ViewMode::Tie),
        other => Err(format!("unknown view mode '{}' (expected full, working_set or tie)", other)),
    }
}
