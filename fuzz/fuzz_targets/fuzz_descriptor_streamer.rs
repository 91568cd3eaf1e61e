#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Any input must either produce records or fail with an error, never panic
    let mut streamer = meshparse::mesh::DescriptorStreamer::new(Cursor::new(data));

    for _ in 0..100 {
        match streamer.next_record() {
            Ok(Some(_record)) => {}
            Ok(None) => break,
            Err(e) if e.is_recoverable() => {}
            Err(_) => break,
        }
    }
});
