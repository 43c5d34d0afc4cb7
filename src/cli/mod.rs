//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the grafapi binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Grafana datasource API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "grafapi", about = "Grafana datasource API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Organization ID to scope requests to (0 = current organization).
    #[arg(long, global = true, env = "GRAFANA_ORG_ID", default_value_t = 0)]
    pub org: u64,

    /// Log requests to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all datasources.
    List,

    /// Get a single datasource by ID or name.
    Get(Target),

    /// Create a datasource from a JSON document.
    Create {
        /// Path to the datasource JSON (`-` for stdin).
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Replace a datasource with a JSON document (its `id` selects the target).
    Update {
        /// Path to the datasource JSON (`-` for stdin).
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Delete a datasource by ID or name.
    Delete(Target),

    /// List available datasource plugin types.
    #[command(alias = "plugins")]
    Types,
}

/// Selects a datasource either by numeric ID or by name.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct Target {
    /// Datasource ID.
    pub id: Option<u64>,

    /// Datasource name.
    #[arg(long)]
    pub name: Option<String>,
}
