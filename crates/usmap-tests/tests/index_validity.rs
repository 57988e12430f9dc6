//! Every name-table reference site rejects an index past the end of the
//! table instead of reading out of bounds or substituting a default.

use usmap_decoder::{
    CompressionMethod, DecodeError, ErrorKind, UsmapDecoder, UsmapVersion,
};
use usmap_tests::{Bytes, wrap};
use usmap_types::TypeError;

/// Body with names `["A", "B"]`, followed by `tables` (enum + schema tables).
fn body_with(tables: impl FnOnce(&mut Bytes)) -> Vec<u8> {
    let mut body = Bytes::default();
    body.u32(2).u16(1).raw(b"A").u16(1).raw(b"B");
    tables(&mut body);
    body.into_vec()
}

fn decode_body(body: &[u8]) -> Result<usmap_decoder::MappingDocument, DecodeError> {
    UsmapDecoder::decode(&wrap(UsmapVersion::LATEST, CompressionMethod::None, body, body))
}

fn assert_out_of_range(body: &[u8], expected_what: &str, expected_index: u32) {
    let err = decode_body(body).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange, "{err}");
    match err {
        DecodeError::Type(TypeError::IndexOutOfRange {
            what, index, len, ..
        }) => {
            assert_eq!(what, expected_what);
            assert_eq!(index, expected_index);
            assert_eq!(len, 2);
        }
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn enum_name() {
    let body = body_with(|b| {
        b.u32(1).u32(2).u16(0).u32(0);
    });
    assert_out_of_range(&body, "enum name", 2);
}

#[test]
fn enum_member() {
    let body = body_with(|b| {
        b.u32(1).u32(0).u16(2).u32(1).u32(7).u32(0);
    });
    assert_out_of_range(&body, "enum member", 7);
}

#[test]
fn schema_name() {
    let body = body_with(|b| {
        b.u32(0).u32(1).u32(9).u32(u32::MAX).u16(0).u16(0);
    });
    assert_out_of_range(&body, "schema name", 9);
}

#[test]
fn super_type() {
    let body = body_with(|b| {
        b.u32(0).u32(1).u32(0).u32(u32::MAX - 1).u16(0).u16(0);
    });
    assert_out_of_range(&body, "super type", u32::MAX - 1);
}

#[test]
fn property_name() {
    let body = body_with(|b| {
        b.u32(0).u32(1).u32(0).u32(u32::MAX).u16(1).u16(1);
        b.u16(0).u8(1).u32(2).u8(2);
    });
    assert_out_of_range(&body, "property name", 2);
}

#[test]
fn struct_type_name() {
    let body = body_with(|b| {
        b.u32(0).u32(1).u32(0).u32(u32::MAX).u16(1).u16(1);
        b.u16(0).u8(1).u32(1).u8(9).u32(3);
    });
    assert_out_of_range(&body, "struct type name", 3);
}

#[test]
fn enum_type_name_inside_a_container() {
    // Array<Enum<Byte, #5>>
    let body = body_with(|b| {
        b.u32(0).u32(1).u32(0).u32(u32::MAX).u16(1).u16(1);
        b.u16(0).u8(1).u32(1).u8(8).u8(26).u8(0).u32(5);
    });
    assert_out_of_range(&body, "enum type name", 5);
}

#[test]
fn sentinel_is_only_special_for_super_types() {
    let body = body_with(|b| {
        b.u32(0).u32(1).u32(u32::MAX).u32(u32::MAX).u16(0).u16(0);
    });
    assert_out_of_range(&body, "schema name", u32::MAX);
}

#[test]
fn valid_indices_resolve() {
    let body = body_with(|b| {
        b.u32(1).u32(0).u16(1).u32(1);
        b.u32(1).u32(1).u32(0).u16(3).u16(0);
    });
    let doc = decode_body(&body).unwrap();
    assert_eq!(doc.enums[0].name, "A");
    assert_eq!(doc.enums[0].members, ["B"]);
    assert_eq!(doc.schemas[0].name, "B");
    assert_eq!(doc.schemas[0].super_type.as_deref(), Some("A"));
    assert_eq!(doc.schemas[0].declared_property_count, 3);
}
