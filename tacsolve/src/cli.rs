//! Command-line interface definition and parsing.

use crate::IOArgs;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the allocation resolver.
///
/// Reads a solve request, searches for the best allocation and writes a JSON
/// report. Ctrl-C ends the search early and still writes the best allocation
/// found so far.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    #[allow(missing_docs)]
    pub io: IOArgs,

    /// Path to configuration file.
    #[arg(short, long, env = "TAC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Give up on the rest of the search after this long (e.g. "2s", "500ms").
    #[arg(short, long)]
    pub time_limit: Option<humantime::Duration>,

    /// Stop as soon as an allocation scores at least this much.
    #[arg(long)]
    pub target_score: Option<i64>,

    /// Allocate only the goods already owned and ignore the price curves.
    #[arg(long)]
    pub owned_only: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
