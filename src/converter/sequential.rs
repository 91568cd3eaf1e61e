use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};

use super::{ConversionError, ConversionStats, MeshConverter};
use crate::mesh::{open_input, DescriptorStreamer, MeshError};
use crate::writer::NdjsonWriter;

impl MeshConverter {
    /// Convert a descriptor file (plain or gzipped) to an NDJSON file
    ///
    /// If conversion fails after the output file was created, the partial
    /// output is removed before the error is returned.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConversionStats, ConversionError> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!("Converting {} to {}", input_path.display(), output_path.display());

        let source_file_size = std::fs::metadata(input_path)?.len();
        let reader = open_input(input_path, self.config.buffer_size)?;
        let mut writer = NdjsonWriter::new_file(output_path, &self.config.writer_config)?;

        let result = self
            .convert_stream(reader, &mut writer)
            .and_then(|stats| writer.close().map(|_| stats).map_err(ConversionError::from));
        let mut stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                remove_partial_output(output_path);
                return Err(e);
            }
        };

        stats.source_file_size = source_file_size;
        stats.output_file_size = std::fs::metadata(output_path)?.len();
        Ok(stats)
    }

    /// Convert records from any buffered XML source into an open writer
    ///
    /// The writer is left open so the caller decides how to finish it.
    pub fn convert_stream<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut NdjsonWriter<W>,
    ) -> Result<ConversionStats, ConversionError> {
        let start = Instant::now();
        let mut streamer = DescriptorStreamer::new(reader);
        let mut stats = ConversionStats::default();
        let bytes_before = writer.stats().bytes_written;

        loop {
            match streamer.next_record() {
                Ok(Some(record)) => {
                    writer.write_record(&record)?;
                    stats.records_written += 1;

                    if self.config.progress_interval > 0
                        && stats.records_written % self.config.progress_interval == 0
                    {
                        info!(
                            "Progress: {} descriptors ({} at byte {})",
                            stats.records_written,
                            record.descriptor_ui,
                            streamer.position()
                        );
                    }
                }
                Ok(None) => break,
                Err(MeshError::Validation(e)) if self.config.skip_invalid => {
                    warn!("Skipping invalid record: {}", e);
                    stats.records_skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        stats.bytes_written = writer.stats().bytes_written - bytes_before;
        stats.elapsed = start.elapsed();

        info!("Conversion complete: {}", stats);
        Ok(stats)
    }
}

fn remove_partial_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => warn!("Removed partial output {}", path.display()),
        Err(e) => warn!("Could not remove partial output {}: {}", path.display(), e),
    }
}
