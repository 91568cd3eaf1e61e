use std::io::BufRead;

use super::DescriptorStreamer;
use crate::mesh::error::MeshError;
use crate::mesh::models::DescriptorRecord;

/// Lazy sequence of descriptor records
///
/// Each call to `next` advances the underlying XML stream by exactly one
/// record. Dropping the iterator drops the stream it owns.
pub struct DescriptorIterator<R: BufRead> {
    pub(super) streamer: DescriptorStreamer<R>,
}

impl<R: BufRead> DescriptorIterator<R> {
    /// Access the underlying streamer (counters, position)
    pub fn streamer(&self) -> &DescriptorStreamer<R> {
        &self.streamer
    }

    /// Stop iterating and return the underlying stream
    pub fn into_inner(self) -> R {
        self.streamer.into_inner()
    }
}

impl<R: BufRead> Iterator for DescriptorIterator<R> {
    type Item = Result<DescriptorRecord, MeshError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.streamer.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
