//! # mesh-convert
//!
//! A command-line tool for converting MeSH descriptor XML to NDJSON.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a (gzipped) descriptor file, one JSON record per line
//! mesh-convert convert desc2024.xml.gz desc2024.ndjson
//!
//! # Summarize a descriptor file without writing anything
//! mesh-convert info desc2024.xml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
