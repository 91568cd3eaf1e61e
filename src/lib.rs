//! # meshparse - Streaming MeSH Descriptor Parser
//!
//! `meshparse` turns the NLM MeSH descriptor XML distribution (`descYYYY.xml`,
//! several hundred megabytes) into a stream of validated, strongly typed
//! [`DescriptorRecord`](mesh::DescriptorRecord)s, one at a time, without ever
//! holding the document or the full output in memory.
//!
//! ## Key Features
//!
//! - **Pull-based streaming**: each record is produced on demand; exactly one
//!   record's subtree is in memory while it is being built.
//!
//! - **Validated records**: required fields, integer date components, real
//!   calendar dates and `Y`/`N` flags are checked when a record completes.
//!
//! - **Fail-fast errors**: malformed XML yields a positioned
//!   [`ParseError`](mesh::ParseError); an invalid record yields a
//!   [`RecordValidationError`](mesh::RecordValidationError) naming the record
//!   and the field.
//!
//! - **NDJSON output**: one self-contained JSON object per line, optionally
//!   gzipped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meshparse::mesh::DescriptorStreamer;
//! use meshparse::writer::{NdjsonWriter, WriterConfig};
//!
//! let streamer = DescriptorStreamer::open("desc2024.xml.gz")?;
//! let mut writer = NdjsonWriter::new_file("desc2024.ndjson", &WriterConfig::default())?;
//!
//! for record in streamer.records() {
//!     writer.write_record(&record?)?;
//! }
//!
//! let stats = writer.close()?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`mesh`]: XML walker, record extractor and the descriptor data model
//! - [`writer`]: NDJSON writer
//! - [`converter`]: file-to-file conversion with progress logging
//! - [`summary`]: aggregate statistics over a descriptor stream

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod converter;
pub mod mesh;
pub mod summary;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::converter::{ConversionConfig, ConversionError, ConversionStats, MeshConverter};
    pub use crate::mesh::{
        parse, Concept, DescriptorIterator, DescriptorRecord, DescriptorStreamer, MeshDate,
        MeshError, ParseError, PharmacologicalAction, QualifierReference, RecordValidationError,
        Term,
    };
    pub use crate::summary::DescriptorSummary;
    pub use crate::writer::{CompressionType, NdjsonWriter, WriterConfig, WriterError, WriterStats};
}
