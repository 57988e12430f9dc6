#![no_main]

use libfuzzer_sys::fuzz_target;
use usmap_types::{EnumDef, NameTable, StructSchema, DEFAULT_MAX_DEPTH};
use usmap_wire::{ByteReader, UsmapVersion};

// Fuzz target: name, enum and schema tables on an uncompressed body.
//
// Byte 0 selects the version (and so the field widths).
fuzz_target!(|data: &[u8]| {
    let Some((&raw, body)) = data.split_first() else {
        return;
    };
    let Ok(version) = UsmapVersion::from_raw(raw % (UsmapVersion::LATEST.raw() + 1)) else {
        return;
    };
    let widths = version.field_widths();
    let mut reader = ByteReader::new(body);

    let Ok(names) = NameTable::decode(&mut reader, widths) else {
        return;
    };
    if EnumDef::decode_table(&mut reader, &names, widths).is_err() {
        return;
    }
    let _ = StructSchema::decode_table(&mut reader, &names, DEFAULT_MAX_DEPTH);
});
