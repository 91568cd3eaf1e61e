//! # MeSH Descriptor Parser Module
//!
//! This module provides streaming parsing of MeSH descriptor files
//! (`descYYYY.xml`), the XML distribution of the NLM Medical Subject Headings
//! vocabulary.
//!
//! ## Design Goals
//!
//! - **Streaming**: Process files of hundreds of megabytes one record at a time
//! - **Strict**: Every record is validated before it is returned
//! - **Ordered**: Repeated elements keep their document order
//!
//! ## Descriptor Structure
//!
//! ```text
//! DescriptorRecordSet
//! └── DescriptorRecord* (record boundary)
//!     ├── DescriptorUI
//!     ├── DescriptorName/String
//!     ├── DateCreated | DateRevised | DateEstablished
//!     │   └── Year, Month, Day
//!     ├── AllowableQualifiersList
//!     │   └── AllowableQualifier*
//!     │       ├── QualifierReferredTo (QualifierUI, QualifierName/String)
//!     │       └── Abbreviation
//!     ├── TreeNumberList
//!     │   └── TreeNumber*
//!     ├── PharmacologicalActionList
//!     │   └── PharmacologicalAction*/DescriptorReferredTo/DescriptorUI
//!     └── ConceptList
//!         └── Concept* (PreferredConceptYN)
//!             ├── ConceptUI, ConceptName/String, ScopeNote
//!             └── TermList
//!                 └── Term* (ConceptPreferredTermYN, IsPermutedTermYN)
//!                     ├── TermUI
//!                     └── String
//! ```
//!
//! ## Layers
//!
//! - [`walker`]: forward-only XML event cursor over quick-xml
//! - [`tree`]: per-record intermediate element tree
//! - [`DescriptorStreamer`]: drives the walker one record at a time

mod error;
mod input;
mod mapping;
mod models;
mod streamer;
pub mod tree;
pub mod walker;

use std::io::BufRead;

pub use error::{MeshError, ParseError, ParseErrorKind, RecordValidationError, ValidationIssue};
pub use input::{open_input, InputStream, DEFAULT_INPUT_BUFFER_SIZE};
pub use mapping::map_descriptor;
pub use models::*;
pub use streamer::{DescriptorIterator, DescriptorStreamer, DESCRIPTOR_RECORD_TAG};
pub use walker::{Attribute, XmlEvent, XmlWalker};

/// Parse a descriptor XML stream into a lazy sequence of records
///
/// ```rust
/// let xml = r#"<DescriptorRecordSet>
///   <DescriptorRecord>
///     <DescriptorUI>D000001</DescriptorUI>
///     <DescriptorName><String>Calcimycin</String></DescriptorName>
///   </DescriptorRecord>
/// </DescriptorRecordSet>"#;
///
/// let records: Vec<_> = meshparse::mesh::parse(xml.as_bytes())
///     .collect::<Result<_, _>>()?;
/// assert_eq!(records[0].descriptor_name, "Calcimycin");
/// # Ok::<(), meshparse::mesh::MeshError>(())
/// ```
pub fn parse<R: BufRead>(reader: R) -> DescriptorIterator<R> {
    DescriptorStreamer::new(reader).records()
}
