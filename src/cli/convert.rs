use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use meshparse::converter::{ConversionConfig, MeshConverter};
use meshparse::writer::{CompressionType, WriterConfig};

use super::config::Config;

pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub skip_invalid: bool,
    pub compress: bool,
    pub buffer_size: Option<usize>,
    pub progress_interval: Option<usize>,
}

/// Convert a descriptor XML file to NDJSON
pub fn run(args: ConvertArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let file_config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let section = file_config.conversion;

    // Default output: desc2024.xml.gz -> desc2024.ndjson
    let output = args.output.clone().unwrap_or_else(|| {
        let name = args.input.file_name().unwrap_or_default().to_string_lossy();
        let stem = name.trim_end_matches(".gz").trim_end_matches(".xml");
        args.input.with_file_name(format!("{}.ndjson", stem))
    });

    let mut writer_config = WriterConfig::for_path(&output);
    if args.compress || section.compress_output.unwrap_or(false) {
        writer_config.compression = CompressionType::gzip();
    }

    let defaults = ConversionConfig::default();
    let config = ConversionConfig {
        writer_config,
        buffer_size: args
            .buffer_size
            .or(section.buffer_size)
            .unwrap_or(defaults.buffer_size),
        skip_invalid: args.skip_invalid || section.skip_invalid.unwrap_or(false),
        progress_interval: args
            .progress_interval
            .or(section.progress_interval)
            .unwrap_or(defaults.progress_interval),
    };

    info!("MeSH Converter - descriptor XML to NDJSON");
    info!("=========================================");
    info!("Input:  {}", args.input.display());
    info!("Output: {}", output.display());
    info!("Compression: {:?}", config.writer_config.compression);
    info!("Buffer size: {}", config.buffer_size);
    if config.skip_invalid {
        info!("Invalid records: skipped");
    }

    let stats = MeshConverter::with_config(config)
        .convert(&args.input, &output)
        .context("Conversion failed")?;

    info!("Conversion complete!");
    info!("  Descriptors written: {}", stats.records_written);
    if stats.records_skipped > 0 {
        info!("  Descriptors skipped: {}", stats.records_skipped);
    }
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        stats.output_file_size,
        stats.output_file_size as f64 / 1024.0 / 1024.0
    );
    info!("  Throughput: {:.0} descriptors/s", stats.records_per_second());

    println!("{}", stats);
    Ok(())
}
