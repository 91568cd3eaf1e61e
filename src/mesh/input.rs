//! Opening descriptor files from disk
//!
//! MeSH descriptor dumps are distributed both as plain XML and gzipped.
//! [`open_input`] sniffs the gzip magic bytes so callers never need to care.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::debug;

use super::error::MeshError;
use super::streamer::DescriptorStreamer;

/// Default input buffer size for descriptor parsing (64KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Boxed buffered input stream, plain or decompressing
pub type InputStream = Box<dyn BufRead + Send>;

/// Open a file as a buffered stream, decompressing gzip transparently
pub fn open_input<P: AsRef<Path>>(path: P, buffer_size: usize) -> io::Result<InputStream> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(buffer_size, file);

    if is_gzip(&mut reader)? {
        debug!("{} is gzip-compressed", path.display());
        let decoder = MultiGzDecoder::new(reader);
        Ok(Box::new(BufReader::with_capacity(buffer_size, decoder)))
    } else {
        Ok(Box::new(reader))
    }
}

fn is_gzip<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let head = reader.fill_buf()?;
    Ok(head.len() >= GZIP_MAGIC.len() && head[..GZIP_MAGIC.len()] == GZIP_MAGIC)
}

impl DescriptorStreamer<InputStream> {
    /// Open a descriptor file (plain or gzipped) with the default buffer size
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        Self::open_with_buffer_size(path, DEFAULT_INPUT_BUFFER_SIZE)
    }

    /// Open a descriptor file with a custom buffer size
    ///
    /// # Example
    /// ```rust,no_run
    /// use meshparse::mesh::DescriptorStreamer;
    ///
    /// let mut streamer = DescriptorStreamer::open_with_buffer_size("desc2024.xml.gz", 256 * 1024)?;
    /// while let Some(record) = streamer.next_record()? {
    ///     println!("{} {}", record.descriptor_ui, record.descriptor_name);
    /// }
    /// # Ok::<(), meshparse::mesh::MeshError>(())
    /// ```
    pub fn open_with_buffer_size<P: AsRef<Path>>(
        path: P,
        buffer_size: usize,
    ) -> Result<Self, MeshError> {
        Ok(Self::new(open_input(path, buffer_size)?))
    }
}
