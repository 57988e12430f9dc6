#![no_main]

use libfuzzer_sys::fuzz_target;
use usmap_types::{NameTable, PropertyType, DEFAULT_MAX_DEPTH};
use usmap_wire::ByteReader;

// Fuzz target: recursive PropertyType::decode.
//
// Byte 0 picks the name table size; the rest is the type tree. Successful
// decodes must respect the depth limit.
fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let names = NameTable::from_names((0..count).map(|i| format!("N{i}")).collect());
    let mut reader = ByteReader::new(rest);
    if let Ok(ty) = PropertyType::decode(&mut reader, &names, DEFAULT_MAX_DEPTH) {
        assert!(ty.depth() <= DEFAULT_MAX_DEPTH);
    }
});
