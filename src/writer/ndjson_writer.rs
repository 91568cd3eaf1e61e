use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use serde::Serialize;

use super::config::{CompressionType, WriterConfig};
use super::error::WriterError;
use super::stats::WriterStats;

/// File output, plain or gzip-compressed
pub enum OutputSink {
    /// Uncompressed file
    Plain(BufWriter<File>),
    /// Gzip-compressed file
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputSink {
    /// Create the output file described by `config`
    pub fn create<P: AsRef<Path>>(path: P, config: &WriterConfig) -> io::Result<Self> {
        let file = BufWriter::with_capacity(config.buffer_size, File::create(path)?);
        Ok(match config.compression {
            CompressionType::Uncompressed => Self::Plain(file),
            CompressionType::Gzip(level) => Self::Gzip(GzEncoder::new(file, Compression::new(level))),
        })
    }

    /// Flush buffers and write the gzip trailer, if any
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut w) => w.flush(),
            Self::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

/// Streaming writer producing one JSON object per line
///
/// Each record is serialized into a reusable line buffer first, so a record
/// that fails to serialize never leaves a partial line in the output.
pub struct NdjsonWriter<W: Write> {
    writer: W,
    line: Vec<u8>,
    stats: WriterStats,
}

impl NdjsonWriter<OutputSink> {
    /// Create a writer for a file path
    pub fn new_file<P: AsRef<Path>>(path: P, config: &WriterConfig) -> Result<Self, WriterError> {
        debug!(
            "Opening NDJSON output {} ({:?})",
            path.as_ref().display(),
            config.compression
        );
        Ok(Self::new(OutputSink::create(path, config)?))
    }

    /// Flush the file, finish compression and return statistics
    pub fn close(self) -> Result<WriterStats, WriterError> {
        let (sink, stats) = self.finish()?;
        sink.finish()?;
        Ok(stats)
    }
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a writer over any byte sink
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line: Vec::with_capacity(4096),
            stats: WriterStats::default(),
        }
    }

    /// Write one record as a single line
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<(), WriterError> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, record)?;
        self.line.push(b'\n');
        self.writer.write_all(&self.line)?;

        self.stats.records_written += 1;
        self.stats.bytes_written += self.line.len() as u64;
        Ok(())
    }

    /// Write every record of an iterator
    pub fn write_records<'a, T, I>(&mut self, records: I) -> Result<(), WriterError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Statistics so far
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Flush and return the underlying writer with final statistics
    pub fn finish(mut self) -> Result<(W, WriterStats), WriterError> {
        self.writer.flush()?;
        Ok((self.writer, self.stats))
    }
}
