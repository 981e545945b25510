//! CLI argument definitions using clap derive
//!
//! Defines all command-line flags. The version flag is a plain bool
//! rather than clap's builtin so the banner and exit semantics stay under
//! application control.

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

/// Query a MISP instance for attributes or events
///
/// Matches are printed to stdout as one JSON document per line.
#[derive(Parser, Debug)]
#[command(name = "mispq")]
#[command(author, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Search for attributes
    #[arg(short = 'a', long)]
    pub attributes: bool,

    /// Search for events
    #[arg(short = 'e', long)]
    pub events: bool,

    /// Print version information and exit
    #[arg(long)]
    pub version: bool,

    /// Configuration file to connect to MISP (default: config.json next to the executable)
    #[arg(short = 'c', long, env = "MISPQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Value to search for
    #[arg(short = 'v', long)]
    pub value: Option<String>,

    /// Time window relative to now (e.g. 5d, 12h)
    #[arg(short = 'l', long)]
    pub last: Option<String>,

    /// Query from date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Query until date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Category to query
    #[arg(long = "cat")]
    pub category: Option<String>,

    /// Type argument for the query
    #[arg(long = "type")]
    pub type_: Option<String>,

    /// Tags argument for the query
    #[arg(long)]
    pub tags: Option<String>,

    /// Organisation filter
    #[arg(long)]
    pub org: Option<String>,

    /// Event ID to look for
    #[arg(long)]
    pub eventid: Option<String>,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
