//! Streaming descriptor record extractor
//!
//! [`DescriptorStreamer`] pulls events from an [`XmlWalker`] just far enough
//! to complete one `DescriptorRecord` element, maps the accumulated subtree
//! into a [`DescriptorRecord`] and returns it. At most one record subtree is
//! held in memory at any time.

use std::io::BufRead;

use log::debug;

use super::error::MeshError;
use super::mapping::map_descriptor;
use super::models::DescriptorRecord;
use super::tree::ElementNode;
use super::walker::{XmlEvent, XmlWalker};

pub use iterators::DescriptorIterator;

mod iterators;


/// Tag of the element delimiting one descriptor record
pub const DESCRIPTOR_RECORD_TAG: &str = "DescriptorRecord";

/// Streaming parser for MeSH descriptor XML
pub struct DescriptorStreamer<R: BufRead> {
    walker: XmlWalker<R>,
    /// Open elements of the record currently being accumulated
    stack: Vec<ElementNode>,
    records_read: usize,
    records_rejected: usize,
}

impl<R: BufRead> DescriptorStreamer<R> {
    /// Create a new streamer from a BufRead source
    pub fn new(reader: R) -> Self {
        Self {
            walker: XmlWalker::new(reader),
            stack: Vec::new(),
            records_read: 0,
            records_rejected: 0,
        }
    }

    /// Number of records returned so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Number of records that failed validation so far
    pub fn records_rejected(&self) -> usize {
        self.records_rejected
    }

    /// Byte offset of the underlying walker
    pub fn position(&self) -> u64 {
        self.walker.position()
    }

    /// Whether a record subtree is currently being accumulated
    pub fn in_record(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Consume the streamer and return the underlying stream
    pub fn into_inner(self) -> R {
        self.walker.into_inner()
    }

    /// Iterate over all remaining records
    pub fn records(self) -> DescriptorIterator<R> {
        DescriptorIterator { streamer: self }
    }

    /// Read the next descriptor record from the stream
    ///
    /// Returns `Ok(None)` once the document is exhausted. A
    /// [`MeshError::Validation`] leaves the streamer positioned after the
    /// offending record, so the caller may call `next_record` again; any
    /// other error ends the stream.
    pub fn next_record(&mut self) -> Result<Option<DescriptorRecord>, MeshError> {
        loop {
            let event = match self.walker.next_event() {
                Ok(Some(event)) => event,
                Ok(None) => return Ok(None),
                Err(e) => {
                    self.stack.clear();
                    return Err(e);
                }
            };

            match event {
                XmlEvent::Start { tag, attributes } => {
                    if self.in_record() || tag == DESCRIPTOR_RECORD_TAG {
                        self.stack.push(ElementNode::new(tag, attributes));
                    }
                }
                XmlEvent::Text { content } => {
                    if let Some(node) = self.stack.last_mut() {
                        node.push_text(&content);
                    }
                }
                XmlEvent::End { .. } => {
                    let Some(node) = self.stack.pop() else {
                        continue;
                    };
                    match self.stack.last_mut() {
                        Some(parent) => parent.push_child(node),
                        None => return self.finish_record(node).map(Some),
                    }
                }
            }
        }
    }

    fn finish_record(&mut self, node: ElementNode) -> Result<DescriptorRecord, MeshError> {
        match map_descriptor(&node) {
            Ok(record) => {
                self.records_read += 1;
                debug!(
                    "Descriptor {} ({}) complete at byte {}",
                    record.descriptor_ui,
                    record.descriptor_name,
                    self.walker.position()
                );
                Ok(record)
            }
            Err(e) => {
                self.records_rejected += 1;
                Err(MeshError::Validation(e))
            }
        }
    }
}
