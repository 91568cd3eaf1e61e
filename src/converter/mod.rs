//! MeSH descriptor XML to NDJSON converter
//!
//! This module wires the descriptor streamer to the NDJSON writer. It is
//! also the one place where the caller-level skip-and-continue policy for
//! invalid records lives; the streamer itself always reports them.

use std::fmt;
use std::time::Duration;

use crate::mesh::{MeshError, DEFAULT_INPUT_BUFFER_SIZE};
use crate::writer::{WriterConfig, WriterError};

mod sequential;


/// Errors that can occur during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Error parsing the input descriptor file
    #[error("MeSH parsing error: {0}")]
    MeshError(#[from] MeshError),

    /// Error writing the output NDJSON file
    #[error("Writer error: {0}")]
    WriterError(#[from] WriterError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration for the descriptor to NDJSON conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Writer configuration
    pub writer_config: WriterConfig,

    /// Input buffer size in bytes
    pub buffer_size: usize,

    /// Log and skip records that fail validation instead of aborting
    pub skip_invalid: bool,

    /// Progress log interval (record count)
    pub progress_interval: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            writer_config: WriterConfig::default(),
            buffer_size: DEFAULT_INPUT_BUFFER_SIZE,
            skip_invalid: false,
            progress_interval: 10_000,
        }
    }
}

/// Statistics from a conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Records written to the output
    pub records_written: usize,
    /// Records dropped by the skip-invalid policy
    pub records_skipped: usize,
    /// Uncompressed bytes written
    pub bytes_written: u64,
    /// Size of the source file in bytes (0 for streams)
    pub source_file_size: u64,
    /// Size of the output file in bytes (0 for streams)
    pub output_file_size: u64,
    /// Wall-clock duration of the conversion
    pub elapsed: Duration,
}

impl ConversionStats {
    /// Records per second over the whole run
    pub fn records_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.records_written as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converted {} descriptors ({} skipped) in {:.2}s",
            self.records_written,
            self.records_skipped,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Converter from MeSH descriptor XML to NDJSON
pub struct MeshConverter {
    config: ConversionConfig,
}

impl MeshConverter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// Create a new converter with custom configuration
    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Enable or disable skipping of invalid records
    pub fn with_skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.config.skip_invalid = skip_invalid;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}

impl Default for MeshConverter {
    fn default() -> Self {
        Self::new()
    }
}
