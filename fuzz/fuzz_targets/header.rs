#![no_main]

use libfuzzer_sys::fuzz_target;
use usmap_wire::{ByteReader, UsmapHeader};

// Fuzz target: UsmapHeader::read_from.
//
// On success the reader must stay inside the buffer and the sizes must
// have come from non-negative fields.
fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    if let Ok(header) = UsmapHeader::read_from(&mut reader) {
        assert!(reader.position() <= data.len());
        assert!(i32::try_from(header.compressed_size).is_ok());
        assert!(i32::try_from(header.uncompressed_size).is_ok());
    }
});
