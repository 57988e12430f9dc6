#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full UsmapDecoder::decode over arbitrary files.
//
// Catches bugs in:
// - Header parsing and the legacy versioning skip
// - Payload bounds and decompression dispatch (brotli, zstd)
// - Table decoding on hostile counts and indices
fuzz_target!(|data: &[u8]| {
    let _ = usmap_decoder::UsmapDecoder::decode(data);
});
