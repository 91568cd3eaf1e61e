use std::path::Path;

use flate2::Compression;

/// Compression options for NDJSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionType {
    /// Plain text, one record per line
    #[default]
    Uncompressed,
    /// Gzip stream with the given level (0-9)
    Gzip(u32),
}

impl CompressionType {
    /// Gzip at flate2's default level
    pub fn gzip() -> Self {
        Self::Gzip(Compression::default().level())
    }

    /// Pick gzip for `*.gz` paths, plain output otherwise
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Self::gzip(),
            _ => Self::Uncompressed,
        }
    }
}

/// Configuration for the NDJSON writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression of the output stream
    pub compression: CompressionType,

    /// Output buffer size in bytes
    pub buffer_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::Uncompressed,
            buffer_size: 64 * 1024,
        }
    }
}

impl WriterConfig {
    /// Default configuration with compression chosen from the output path
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            compression: CompressionType::for_path(path),
            ..Default::default()
        }
    }
}
