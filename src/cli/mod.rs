use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod convert;
mod info;

/// mesh-convert - MeSH descriptor XML to NDJSON converter
#[derive(Parser)]
#[command(name = "mesh-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a descriptor XML file (plain or .gz) to NDJSON
    Convert {
        /// Input descriptor XML path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output NDJSON path (defaults to <input stem>.ndjson; .gz compresses)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Log and skip records that fail validation instead of aborting
        #[arg(long)]
        skip_invalid: bool,

        /// Gzip the output regardless of its extension
        #[arg(short = 'z', long)]
        compress: bool,

        // === Advanced tuning flags (hidden from --help) ===
        /// Input buffer size in bytes
        #[arg(long, hide = true)]
        buffer_size: Option<usize>,

        /// Progress log interval in records
        #[arg(long, hide = true)]
        progress_interval: Option<usize>,
    },

    /// Display summary statistics of a descriptor XML file
    Info {
        /// Input descriptor XML path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            skip_invalid,
            compress,
            buffer_size,
            progress_interval,
        } => convert::run(convert::ConvertArgs {
            input,
            output,
            config,
            skip_invalid,
            compress,
            buffer_size,
            progress_interval,
        }),
        Commands::Info { file } => info::run(file),
    }
}
