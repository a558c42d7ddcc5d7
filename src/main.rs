//! grepctx - Structured search over a directory tree
//!
//! grepctx provides:
//! - File listing by content match (grep -l)
//! - Match blocks with surrounding context, one record per block
//! - File lookup by name pattern (find -name)
//! - Tool definitions and a JSON dispatcher for agent callers

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod logging;
mod parse;
mod search;
mod tools;

fn main() -> Result<()> {
    // Check for unsupported platforms
    #[cfg(windows)]
    {
        eprintln!("Error: Windows is not supported. Please use WSL (not guaranteed to work).");
        std::process::exit(1);
    }

    let cli = cli::Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, !cli.no_color)?;
    cli::run(cli)
}
