//! # NDJSON Writer Module
//!
//! Writes descriptor records as newline-delimited JSON: one self-contained
//! JSON object per line, lines separated by a single `\n`, no state shared
//! across lines.
//!
//! Output can be plain text or gzip-compressed; [`CompressionType::for_path`]
//! picks gzip for `*.gz` paths.

mod config;
mod error;
mod ndjson_writer;
mod stats;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use ndjson_writer::{NdjsonWriter, OutputSink};
pub use stats::WriterStats;
