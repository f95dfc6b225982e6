//! Command-line interface definitions for the runbook index generator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Running with no arguments indexes the current directory with the built-in
//! folder list.

use clap::Parser;

/// Command-line arguments for the runbook index generator.
///
/// # Examples
///
/// ```sh
/// # Index the current directory with the default folder set
/// runbook_index
///
/// # Index a different checkout
/// runbook_index -r ~/soc-runbooks
///
/// # Override the folder list from a YAML file
/// runbook_index --config folders.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Repository root containing the runbook folders
    #[arg(short, long, env = "RUNBOOK_ROOT", default_value = ".")]
    pub root: String,

    /// Optional path to a YAML file listing the folders to index
    #[arg(short, long)]
    pub config: Option<String>,
}
